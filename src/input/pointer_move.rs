//! Pointer move handling - drag, pan, box selection and link preview.
//!
//! ## Performance Notes
//!
//! Pointer move fires on every frame of a gesture. Key points:
//! - Early exit for Idle
//! - Pan changes go through the coalescing transform store
//! - Group drags touch each bulk member once per move
//!
//! Enable profiling with `cargo build --features profiling` to see timing.

use crate::editor::Editor;
use crate::geometry::{Point, snap_to_grid};
use crate::input::{HoverTarget, InteractionState};
use crate::pointer::PointerEvent;
use crate::profile_scope;
use crate::transform::TransformPatch;
use crate::types::ObjectType;

impl Editor {
    pub fn handle_pointer_move(&mut self, event: &PointerEvent) {
        profile_scope!("handle_pointer_move");

        if !self.pointer.observe(event) {
            return;
        }
        let p = self.pointer_diagram();

        match &mut self.input_state {
            InteractionState::Idle => {}
            InteractionState::Panning {
                pan_start,
                cursor_start,
            } => {
                // Screen-space deltas: the diagram position under the cursor
                // shifts as the pan changes, the screen position does not.
                let zoom = self.transform.zoom();
                let screen = self.pointer.screen();
                let pan = Point::new(
                    pan_start.x + (cursor_start.x - screen.x) / zoom,
                    pan_start.y + (cursor_start.y - screen.y) / zoom,
                );
                self.transform.set_transform(TransformPatch::pan(pan));
            }
            InteractionState::BoxSelecting { end, .. } => *end = p,
            InteractionState::Linking { end_point, .. } => {
                *end_point = p;
                self.update_link_hover(p);
            }
            InteractionState::Dragging { .. } => self.drag_to(p),
        }
    }

    /// Move the bulk selection so the grabbed element follows `pointer`.
    fn drag_to(&mut self, pointer: Point) {
        profile_scope!("drag_bulk_selection");

        let InteractionState::Dragging {
            element,
            grab_offset,
        } = &self.input_state
        else {
            return;
        };

        let mut candidate = pointer - *grab_offset;
        if let Some(grid) = self.settings.snap_grid() {
            candidate = snap_to_grid(candidate, grid);
        }

        let Some(grabbed) = self.selection.find(element) else {
            return;
        };
        let delta = candidate - grabbed.current_coords;
        if delta == Point::ZERO {
            return;
        }

        for el in self.selection.bulk_mut() {
            let next = el.current_coords + delta;
            if el.kind == ObjectType::Table {
                // Locked or gone: stays put
                let movable = self.diagram.table(&el.id).is_some_and(|t| !t.locked);
                if !movable {
                    continue;
                }
                self.diagram.update_table_position(&el.id, next);
            }
            el.current_coords = next;
        }
    }

    /// Hover target under the pointer while linking: a field row, or just
    /// the table when over its header.
    fn update_link_hover(&mut self, p: Point) {
        self.hover = self.diagram.hit_test(p, self.transform.zoom()).map(|hit| {
            let field_id = hit.field.map(|f| f.field_id).unwrap_or_default();
            HoverTarget::new(hit.table_id, field_id)
        });
    }
}
