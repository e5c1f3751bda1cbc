//! Pointer up/cancel handling - commit drags, finalize box selection and
//! links, return to Idle.

use crate::editor::Editor;
use crate::geometry::Rect;
use crate::input::InteractionState;
use crate::pointer::{CursorStyle, PointerEvent};
use crate::profile_scope;
use crate::selection::{BulkElement, ElementRef};
use tracing::debug;

impl Editor {
    pub fn handle_pointer_up(&mut self, event: &PointerEvent) {
        profile_scope!("handle_pointer_up");

        if !event.is_primary {
            return;
        }

        self.commit_drag();

        let finished = self.input_state.take();
        if let InteractionState::BoxSelecting { start, end, additive } = finished {
            self.finish_box_selection(Rect::from_endpoints(start, end), additive);
        }

        self.pointer.set_style(CursorStyle::Default);

        if let Some(start) = finished.link_start() {
            if let Err(e) = self.finalize_link(start) {
                debug!(reason = %e, "Link gesture produced no relationship");
            }
            self.hover = None;
        }
    }

    /// Abort the gesture: keep whatever a drag already moved, but do not
    /// collect a box selection or create a link.
    pub fn handle_pointer_cancel(&mut self, event: &PointerEvent) {
        if !event.is_primary {
            return;
        }
        self.commit_drag();
        let cancelled = self.input_state.take();
        if !cancelled.is_idle() {
            debug!(?cancelled, "Gesture cancelled");
        }
        self.hover = None;
        self.pointer.set_style(CursorStyle::Default);
    }

    /// Make moved bulk positions the baseline for the next drag. Locked
    /// members stay put, so any member may be the one that moved.
    fn commit_drag(&mut self) {
        let moved = self.selection.bulk().iter().any(BulkElement::has_moved);
        if moved {
            self.selection.commit_positions();
            debug!(count = self.selection.bulk().len(), "Drag committed");
        }
    }

    fn finish_box_selection(&mut self, rect: Rect, additive: bool) {
        profile_scope!("finish_box_selection");

        let picked: Vec<BulkElement> = self
            .diagram
            .tables_inside(rect)
            .into_iter()
            .map(|t| BulkElement::new(ElementRef::table(&t.id), t.position()))
            .collect();
        debug!(count = picked.len(), additive, "Box selection finished");

        if additive {
            self.selection.extend_unique(picked);
        } else {
            self.selection.set_bulk(picked);
        }
    }
}
