//! Application-wide constants.
//!
//! Centralizes magic numbers and layout values so the interaction core,
//! the path engine and the render surface agree on the same geometry.

// ============================================================================
// Zoom & Pan
// ============================================================================

/// Minimum zoom level
pub const MIN_ZOOM: f64 = 0.02;

/// Maximum zoom level
pub const MAX_ZOOM: f64 = 5.0;

/// Default zoom level
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Multiplicative zoom step for ctrl+wheel and the toolbar buttons
pub const ZOOM_FACTOR: f64 = 1.05;

/// How eagerly a ctrl+wheel zoom pulls the viewport towards the cursor
pub const ZOOM_EAGERNESS_FACTOR: f64 = 0.05;

// ============================================================================
// Grid
// ============================================================================

/// Grid cell size in diagram units
pub const GRID_SIZE: f64 = 24.0;

// ============================================================================
// Table Layout
// ============================================================================

/// Rendered width of every table
pub const DEFAULT_TABLE_WIDTH: f64 = 220.0;

/// Color strip plus title bar
pub const TABLE_HEADER_HEIGHT: f64 = 50.0;

/// Height of one field row
pub const TABLE_FIELD_HEIGHT: f64 = 36.0;

/// Color assigned to tables created without explicit data
pub const DEFAULT_TABLE_COLOR: &str = "#155dfc";

// ============================================================================
// Relationship Paths
// ============================================================================

/// Corner radius at zoom 1.0
pub const PATH_BASE_RADIUS: f64 = 10.0;

/// Vertical gap is divided by this to derive the corner radius
pub const PATH_RADIUS_DIVISOR: f64 = 3.0;

/// Below this derived radius nearly-level connectors are drawn straight
pub const PATH_LINEAR_MAX_RADIUS: f64 = 2.0;

/// Vertical nudge that keeps zero-height straight segments visible
pub const PATH_LINEAR_EPSILON: f64 = 0.1;

// ============================================================================
// Linking
// ============================================================================

/// Horizontal distance from a table's left edge to its field connectors
pub const LINK_HANDLE_INSET: f64 = 15.0;

/// Hit radius around a field connector, in screen pixels (diagram units at zoom 1.0)
pub const LINK_HANDLE_HIT_RADIUS: f64 = 8.0;

// ============================================================================
// Selection
// ============================================================================

/// Gap between the bulk selection frame and the selected tables
pub const BULK_SELECTION_FRAME_OFFSET: f64 = 8.0;
