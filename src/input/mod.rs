//! Pointer and wheel input handling for the diagram canvas.
//!
//! This module implements all pointer interaction logic for the editor:
//! selection, single and group drags, box selection, panning, wheel zoom and
//! drawing relationships between fields.
//!
//! ## Architecture
//!
//! The input system uses an explicit state machine (`InteractionState`) to
//! track the current gesture. Handlers are `impl Editor` blocks split by
//! event kind; each one reads the stores on [`crate::editor::Editor`] and
//! mutates them directly.
//!
//! ## Modules
//!
//! - `state` - Interaction state enum and helper methods
//! - `pointer_down` - Pointer down handling (selection, gesture start)
//! - `pointer_move` - Pointer move handling (drag, pan, box, link preview)
//! - `pointer_up` - Pointer up/cancel handling (commit drag, finalize box)
//! - `wheel` - Wheel zoom and scroll panning
//! - `linking` - Link gesture start, hover tracking and finalization

mod linking;
mod pointer_down;
mod pointer_move;
mod pointer_up;
mod state;
mod wheel;

pub use linking::LinkError;
pub use state::{HoverTarget, InteractionState};
