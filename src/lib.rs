//! Interaction core for an entity-relationship diagram canvas.
//!
//! Tables sit on an infinite pannable, zoomable canvas; the core turns raw
//! pointer and wheel input into panning, box selection, single and group
//! drags with grid snapping, and relationships drawn between fields. It is
//! headless: a host forwards events to an [`Editor`], calls
//! [`Editor::tick`] once per frame and draws [`Editor::scene`].

pub mod constants;
pub mod data_types;
pub mod diagram;
pub mod editor;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod path;
pub mod perf;
pub mod pointer;
pub mod selection;
pub mod settings;
pub mod settings_watcher;
pub mod spatial_index;
pub mod transform;
pub mod types;
pub mod viewport;

pub use editor::{Editor, RelationshipView, Scene};
pub use input::{HoverTarget, InteractionState, LinkError};
