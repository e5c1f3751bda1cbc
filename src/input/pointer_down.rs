//! Pointer down handling - selection and gesture start.
//!
//! ## Performance Notes
//!
//! Hit testing goes through the R-tree in the diagram store, so a press
//! costs O(log n) in the number of tables.
//!
//! Enable profiling with `cargo build --features profiling` to see timing.

use crate::editor::Editor;
use crate::geometry::Point;
use crate::input::InteractionState;
use crate::pointer::{CursorStyle, Modifiers, PointerButton, PointerEvent};
use crate::profile_scope;
use crate::selection::{BulkElement, ElementRef};
use crate::types::ObjectType;
use tracing::debug;

impl Editor {
    pub fn handle_pointer_down(&mut self, event: &PointerEvent) {
        profile_scope!("handle_pointer_down");

        if !self.pointer.observe(event) {
            return;
        }

        match event.button {
            PointerButton::Middle => {
                self.input_state = InteractionState::Panning {
                    pan_start: self.transform.pan(),
                    cursor_start: self.pointer.screen(),
                };
                self.pointer.set_style(CursorStyle::Grabbing);
                debug!("Panning started");
            }
            PointerButton::Left => self.left_pointer_down(event.modifiers),
            _ => {}
        }
    }

    fn left_pointer_down(&mut self, modifiers: Modifiers) {
        let p = self.pointer_diagram();
        self.pointer.set_style(CursorStyle::Crosshair);

        profile_scope!("hit_test_tables");
        let Some(hit) = self.diagram.hit_test(p, self.transform.zoom()) else {
            self.begin_box_selection(modifiers.ctrl_like());
            return;
        };

        // Pressing a field's connector starts a link instead of a drag
        if let Some(field) = hit.field.as_ref().filter(|f| f.on_connector) {
            if !modifiers.ctrl_like() {
                if let Some(position) = self.diagram.table(&hit.table_id).map(|t| t.position()) {
                    self.select_pressed(ElementRef::table(&hit.table_id), position);
                }
                let field_id = field.field_id.clone();
                self.begin_link(&hit.table_id, &field_id);
                return;
            }
        }

        self.press_element(ElementRef::table(hit.table_id), modifiers);
    }

    /// Resolve selection for a press on an element, then start dragging
    /// unless ctrl/meta is held or the element is locked.
    pub(crate) fn press_element(&mut self, element: ElementRef, modifiers: Modifiers) {
        let Some(table) = self.diagram.table(&element.id) else {
            return;
        };
        let (position, locked) = (table.position(), table.locked);

        if modifiers.ctrl_like() {
            if self.selection.contains(&element) {
                if self.selection.bulk().len() > 1 {
                    self.selection.remove(&element);
                    self.selection.clear_selected();
                }
            } else {
                self.selection.push(BulkElement::new(element, position));
            }
            return;
        }

        self.select_pressed(element.clone(), position);

        if locked {
            debug!(table_id = %element.id, "Locked table selected, not dragging");
            return;
        }

        self.sync_bulk_positions();
        let grab_offset = self.pointer_diagram() - position;
        debug!(table_id = %element.id, bulk = self.selection.bulk().len(), "Drag started");
        self.input_state = InteractionState::Dragging {
            element,
            grab_offset,
        };
    }

    /// Make `element` the primary selection. A bulk set it is not part of
    /// is replaced by the element alone.
    fn select_pressed(&mut self, element: ElementRef, position: Point) {
        if !self.selection.contains(&element) {
            self.selection
                .set_bulk(vec![BulkElement::new(element.clone(), position)]);
        }
        self.selection.set_selected(element);
    }

    fn begin_box_selection(&mut self, additive: bool) {
        if !additive {
            self.selection.clear();
        }
        let start = self.pointer_diagram();
        self.input_state = InteractionState::BoxSelecting {
            start,
            end: start,
            additive,
        };
    }

    /// Reset each bulk table's coordinates to where the model has it, so a
    /// table moved outside a drag does not jump when the next drag begins.
    fn sync_bulk_positions(&mut self) {
        for el in self.selection.bulk_mut() {
            if el.kind != ObjectType::Table {
                continue;
            }
            if let Some(table) = self.diagram.table(&el.id) {
                el.current_coords = table.position();
                el.initial_coords = el.current_coords;
            }
        }
    }
}
