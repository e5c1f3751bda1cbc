//! Pointer tracking for the canvas container.
//!
//! The tracker records where the primary pointer is, relative to the
//! container's bounding box, and derives the matching diagram position
//! through the current transform. Secondary pointers (extra touches) are
//! ignored so a multi-touch gesture cannot yank the view around.

use crate::geometry::{Point, Rect};
use crate::transform::TransformState;
use crate::viewport::Viewport;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
    Other(i16),
}

impl PointerButton {
    /// Map a DOM-style `button` index.
    pub fn from_index(index: i16) -> Self {
        match index {
            0 => Self::Left,
            1 => Self::Middle,
            2 => Self::Right,
            other => Self::Other(other),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS.
    #[inline]
    pub fn ctrl_like(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A pointer-down/move/up/cancel event in client (window) coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub pointer_id: i32,
    pub is_primary: bool,
    pub button: PointerButton,
    pub client: Point,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// A primary left-button event with no modifiers.
    pub fn primary(client: Point) -> Self {
        Self {
            pointer_id: 1,
            is_primary: true,
            button: PointerButton::Left,
            client,
            modifiers: Modifiers::default(),
        }
    }
}

/// A wheel/trackpad scroll event.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WheelEvent {
    pub delta_x: f64,
    pub delta_y: f64,
    pub modifiers: Modifiers,
}

/// Cursor shown over the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorStyle {
    #[default]
    Default,
    Crosshair,
    Grabbing,
}

impl CursorStyle {
    /// CSS cursor keyword.
    pub fn as_css(&self) -> &'static str {
        match self {
            CursorStyle::Default => "default",
            CursorStyle::Crosshair => "crosshair",
            CursorStyle::Grabbing => "grabbing",
        }
    }
}

#[derive(Debug, Default)]
pub struct PointerTracker {
    /// Container bounding box in client coordinates
    bounds: Rect,
    screen: Point,
    style: CursorStyle,
}

impl PointerTracker {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            ..Self::default()
        }
    }

    /// Record a new container bounding box (resize or scroll of the page).
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn screen_size(&self) -> Point {
        Point::new(self.bounds.width, self.bounds.height)
    }

    /// Update from a pointer-down or pointer-move. Returns false for
    /// non-primary pointers, which are not recorded.
    pub fn observe(&mut self, event: &PointerEvent) -> bool {
        if !event.is_primary {
            return false;
        }
        self.screen = Point::new(
            event.client.x - self.bounds.x,
            event.client.y - self.bounds.y,
        );
        true
    }

    /// Last primary pointer position relative to the container.
    pub fn screen(&self) -> Point {
        self.screen
    }

    /// Last primary pointer position in diagram space.
    pub fn diagram(&self, transform: TransformState) -> Point {
        self.viewport(transform).point_to_diagram(self.screen)
    }

    pub fn viewport(&self, transform: TransformState) -> Viewport {
        Viewport::new(self.screen_size(), transform)
    }

    pub fn style(&self) -> CursorStyle {
        self.style
    }

    pub fn set_style(&mut self, style: CursorStyle) {
        self.style = style;
    }
}
