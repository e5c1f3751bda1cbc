//! Interaction state machine for the canvas.
//!
//! Exactly one gesture is active at a time, so combinations like panning
//! while linking cannot be represented.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Panning        (middle button down)
//! Idle -> BoxSelecting   (left button down on empty canvas)
//! Idle -> Dragging       (left button down on a table, no ctrl/meta)
//! Idle -> Linking        (left button down on a field connector)
//!
//! Any -> Idle            (pointer up or cancel, finalizes the gesture)
//! ```

use crate::geometry::{Point, Rect};
use crate::selection::ElementRef;
use crate::types::FieldRef;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum InteractionState {
    /// No active gesture
    #[default]
    Idle,

    /// Middle-button pan
    Panning {
        /// Pan when the gesture began
        pan_start: Point,
        /// Screen cursor when the gesture began
        cursor_start: Point,
    },

    /// Rubber-band selection, corners in diagram space
    BoxSelecting {
        start: Point,
        end: Point,
        /// Ctrl/meta was held at gesture start: union instead of replace
        additive: bool,
    },

    /// Moving the bulk selection
    Dragging {
        /// Element under the cursor when the drag began
        element: ElementRef,
        /// Pointer minus element origin at drag start
        grab_offset: Point,
    },

    /// Drawing a relationship from a field connector
    Linking {
        start: FieldRef,
        /// Preview start (the connector) and live end, in diagram space
        start_point: Point,
        end_point: Point,
    },
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_panning(&self) -> bool {
        matches!(self, Self::Panning { .. })
    }

    pub fn is_box_selecting(&self) -> bool {
        matches!(self, Self::BoxSelecting { .. })
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    pub fn is_linking(&self) -> bool {
        matches!(self, Self::Linking { .. })
    }

    /// Element being dragged, if any
    pub fn dragged_element(&self) -> Option<&ElementRef> {
        match self {
            Self::Dragging { element, .. } => Some(element),
            _ => None,
        }
    }

    /// Normalized box-selection rectangle, if box selecting
    pub fn selection_rect(&self) -> Option<Rect> {
        match self {
            Self::BoxSelecting { start, end, .. } => Some(Rect::from_endpoints(*start, *end)),
            _ => None,
        }
    }

    /// Link preview endpoints, if linking
    pub fn link_preview(&self) -> Option<(Point, Point)> {
        match self {
            Self::Linking {
                start_point,
                end_point,
                ..
            } => Some((*start_point, *end_point)),
            _ => None,
        }
    }

    pub fn link_start(&self) -> Option<&FieldRef> {
        match self {
            Self::Linking { start, .. } => Some(start),
            _ => None,
        }
    }

    /// Move the box-selection corner that follows the pointer
    pub fn set_box_end(&mut self, p: Point) {
        if let Self::BoxSelecting { end, .. } = self {
            *end = p;
        }
    }

    /// Move the live end of the link preview
    pub fn set_link_end(&mut self, p: Point) {
        if let Self::Linking { end_point, .. } = self {
            *end_point = p;
        }
    }

    /// Return to Idle, handing back the state that was active.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

/// What the pointer is hovering during a link gesture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoverTarget {
    pub table_id: String,
    /// Empty when over the table but not a field row
    pub field_id: String,
}

impl HoverTarget {
    pub fn new(table_id: impl Into<String>, field_id: impl Into<String>) -> Self {
        Self {
            table_id: table_id.into(),
            field_id: field_id.into(),
        }
    }

    /// Both a table and a field are hovered.
    pub fn is_complete(&self) -> bool {
        !self.table_id.is_empty() && !self.field_id.is_empty()
    }

    pub fn field_ref(&self) -> FieldRef {
        FieldRef::new(&self.table_id, &self.field_id)
    }
}
