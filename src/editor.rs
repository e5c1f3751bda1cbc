//! One editor session.
//!
//! [`Editor`] owns every store the interaction core touches: transform,
//! pointer tracker, diagram model, selection, settings and the active
//! gesture. Nothing is global; a host creates one `Editor` per open diagram,
//! forwards input events to the `handle_*` methods in [`crate::input`], calls
//! [`Editor::tick`] once per render frame and draws [`Editor::scene`].

use crate::constants::BULK_SELECTION_FRAME_OFFSET;
use crate::diagram::DiagramStore;
use crate::geometry::{Point, Rect, center_of};
use crate::input::{HoverTarget, InteractionState};
use crate::path::link_preview_path;
use crate::perf::FrameStats;
use crate::pointer::{CursorStyle, PointerTracker};
use crate::selection::SelectionStore;
use crate::settings::EditorSettings;
use crate::transform::{TransformPatch, TransformState, TransformStore, TransformUpdate};
use crate::types::{ObjectType, Table};
use crate::viewport::Viewport;
use serde::Serialize;
use tracing::{debug, info};

#[derive(Debug, Default)]
pub struct Editor {
    pub(crate) transform: TransformStore,
    pub(crate) pointer: PointerTracker,
    pub(crate) diagram: DiagramStore,
    pub(crate) selection: SelectionStore,
    pub(crate) settings: EditorSettings,
    pub(crate) input_state: InteractionState,
    pub(crate) hover: Option<HoverTarget>,
}

impl Editor {
    pub fn new(settings: EditorSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Start from an existing set of tables.
    pub fn with_tables(mut self, tables: Vec<Table>) -> Self {
        self.diagram.set_tables(tables);
        self
    }

    /// Record the canvas container's bounding box in client coordinates.
    pub fn set_container_bounds(&mut self, bounds: Rect) {
        self.pointer.set_bounds(bounds);
    }

    // ------------------------------------------------------------------------
    // Store access
    // ------------------------------------------------------------------------

    pub fn transform(&self) -> TransformState {
        self.transform.get()
    }

    /// Request a transform change; it lands on the next [`Editor::tick`].
    pub fn set_transform(&mut self, update: impl Into<TransformUpdate>) {
        self.transform.set_transform(update);
    }

    pub fn viewport(&self) -> Viewport {
        self.pointer.viewport(self.transform.get())
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    /// Last primary pointer position in diagram space.
    pub fn pointer_diagram(&self) -> Point {
        self.pointer.diagram(self.transform.get())
    }

    pub fn cursor(&self) -> CursorStyle {
        self.pointer.style()
    }

    pub fn diagram(&self) -> &DiagramStore {
        &self.diagram
    }

    pub fn diagram_mut(&mut self) -> &mut DiagramStore {
        &mut self.diagram
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionStore {
        &mut self.selection
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// Swap in new settings, e.g. after the settings file changed on disk.
    /// Takes effect from the next event.
    pub fn apply_settings(&mut self, settings: EditorSettings) {
        if settings != self.settings {
            info!(?settings, "Editor settings updated");
            self.settings = settings;
        }
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.input_state
    }

    pub fn hover_target(&self) -> Option<&HoverTarget> {
        self.hover.as_ref()
    }

    pub fn frame_stats(&self) -> &FrameStats {
        self.transform.stats()
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Run one render frame. Returns true if the transform changed.
    pub fn tick(&mut self) -> bool {
        self.transform.tick()
    }

    /// End the session. Pending transform updates are dropped and any
    /// gesture in flight is abandoned.
    pub fn teardown(&mut self) {
        self.transform.teardown();
        self.input_state = InteractionState::Idle;
        self.hover = None;
        self.pointer.set_style(CursorStyle::Default);
        debug!("Editor torn down");
    }

    pub fn is_torn_down(&self) -> bool {
        self.transform.is_torn_down()
    }

    // ------------------------------------------------------------------------
    // Toolbar actions
    // ------------------------------------------------------------------------

    /// Add a default table at the current pan center and return its id.
    pub fn add_table(&mut self) -> String {
        self.diagram.add_table(self.transform.pan())
    }

    /// Zoom in one step around the view center.
    pub fn zoom_in(&mut self) {
        let factor = self.settings.zoom_factor;
        self.transform
            .set_transform(TransformUpdate::map(move |prev| TransformPatch::zoom(prev.zoom * factor)));
    }

    /// Zoom out one step around the view center.
    pub fn zoom_out(&mut self) {
        let factor = self.settings.zoom_factor;
        self.transform
            .set_transform(TransformUpdate::map(move |prev| TransformPatch::zoom(prev.zoom / factor)));
    }

    /// Pan to the midpoint of the table origins' bounding box, or to the
    /// diagram origin when there are no tables.
    pub fn center_on_tables(&mut self) {
        let center =
            center_of(self.diagram.tables().iter().map(Table::position)).unwrap_or(Point::ZERO);
        self.transform.set_transform(TransformPatch::pan(center));
    }

    // ------------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------------

    /// Everything the render surface needs for one frame.
    pub fn scene(&self) -> Scene<'_> {
        let transform = self.transform.get();
        let selection_rect = self.input_state.selection_rect();

        let relationships = self
            .diagram
            .relationship_paths(transform.zoom)
            .into_iter()
            .map(|(id, path)| RelationshipView {
                id,
                path: path.to_svg(),
                is_linear: path.is_linear,
            })
            .collect();

        Scene {
            view_box: self.viewport().view_box(),
            zoom: transform.zoom,
            grid_size: self.settings.grid_size,
            tables: self.diagram.tables(),
            relationships,
            link_preview: self
                .input_state
                .link_preview()
                .map(|(start, end)| link_preview_path(start, end)),
            selection_rect,
            bulk_frame: if selection_rect.is_none() {
                self.bulk_selection_frame()
            } else {
                None
            },
            cursor: self.pointer.style(),
        }
    }

    /// Frame drawn around a multi-element selection.
    pub fn bulk_selection_frame(&self) -> Option<Rect> {
        let bulk = self.selection.bulk();
        if bulk.len() < 2 {
            return None;
        }
        let rects = bulk
            .iter()
            .filter(|el| el.kind == ObjectType::Table)
            .filter_map(|el| self.diagram.table(&el.id))
            .map(Table::rect);
        Rect::union_all(rects).map(|r| r.inflate(BULK_SELECTION_FRAME_OFFSET))
    }
}

/// A relationship ready to draw.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RelationshipView {
    pub id: String,
    /// SVG path data
    pub path: String,
    pub is_linear: bool,
}

/// Read-only snapshot of what to draw.
#[derive(Debug, Serialize)]
pub struct Scene<'a> {
    /// Visible diagram-space rectangle
    pub view_box: Rect,
    pub zoom: f64,
    pub grid_size: f64,
    pub tables: &'a [Table],
    pub relationships: Vec<RelationshipView>,
    /// Curve from the link start to the pointer while linking
    pub link_preview: Option<String>,
    /// Rubber band while box selecting
    pub selection_rect: Option<Rect>,
    pub bulk_frame: Option<Rect>,
    pub cursor: CursorStyle,
}
