//! Wheel handling - zoom toward the cursor and scroll panning.
//!
//! Every branch submits a function of the previous transform, so whichever
//! update survives coalescing is applied against the state current at flush
//! time.

use crate::editor::Editor;
use crate::pointer::WheelEvent;
use crate::profile_scope;
use crate::transform::{TransformPatch, TransformUpdate};

impl Editor {
    /// Handle a wheel event. The host should always suppress the browser's
    /// default scroll for canvas wheel events.
    pub fn handle_wheel(&mut self, event: &WheelEvent) {
        profile_scope!("handle_wheel");

        let (dx, dy) = (event.delta_x, event.delta_y);

        let update = if event.modifiers.ctrl_like() {
            // Zoom, pulling the pan toward the diagram point under the cursor
            let cursor = self.pointer_diagram();
            let factor = self.settings.zoom_factor;
            let eagerness = self.settings.zoom_eagerness;
            let direction = if dy == 0.0 { 0.0 } else { dy.signum() };

            TransformUpdate::map(move |prev| TransformPatch {
                zoom: Some(if dy <= 0.0 {
                    prev.zoom * factor
                } else {
                    prev.zoom / factor
                }),
                pan_x: Some(prev.pan.x - (cursor.x - prev.pan.x) * eagerness * direction),
                pan_y: Some(prev.pan.y - (cursor.y - prev.pan.y) * eagerness * direction),
            })
        } else if event.modifiers.shift {
            TransformUpdate::map(move |prev| TransformPatch::pan_x(prev.pan.x + dy / prev.zoom))
        } else {
            TransformUpdate::map(move |prev| TransformPatch {
                zoom: None,
                pan_x: Some(prev.pan.x + dx / prev.zoom),
                pan_y: Some(prev.pan.y + dy / prev.zoom),
            })
        };

        self.transform.set_transform(update);
    }
}
