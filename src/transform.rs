//! Zoom/pan state with frame-coalesced updates.
//!
//! `set_transform` never applies immediately. The latest requested update is
//! parked and applied on the next [`TransformStore::tick`], which the host
//! calls once per render frame. Requests made between two ticks collapse to
//! the last one.
//!
//! Every applied update is normalized: zoom falls back through
//! candidate -> previous -> default (first finite value) and is clamped to
//! `[MIN_ZOOM, MAX_ZOOM]`; each pan axis falls back through
//! candidate -> previous -> 0.

use crate::constants::{DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM};
use crate::geometry::Point;
use crate::perf::FrameStats;
use crate::profile_scope;
use tracing::{debug, trace};

/// Current zoom and the diagram point the viewport is centered on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformState {
    pub zoom: f64,
    pub pan: Point,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            pan: Point::ZERO,
        }
    }
}

/// A possibly partial transform. Missing or non-finite values fall back to
/// the previous state when applied.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransformPatch {
    pub zoom: Option<f64>,
    pub pan_x: Option<f64>,
    pub pan_y: Option<f64>,
}

impl TransformPatch {
    pub fn zoom(zoom: f64) -> Self {
        Self {
            zoom: Some(zoom),
            ..Self::default()
        }
    }

    pub fn pan(pan: Point) -> Self {
        Self {
            zoom: None,
            pan_x: Some(pan.x),
            pan_y: Some(pan.y),
        }
    }

    pub fn pan_x(x: f64) -> Self {
        Self {
            pan_x: Some(x),
            ..Self::default()
        }
    }
}

impl From<TransformState> for TransformPatch {
    fn from(state: TransformState) -> Self {
        Self {
            zoom: Some(state.zoom),
            pan_x: Some(state.pan.x),
            pan_y: Some(state.pan.y),
        }
    }
}

/// A requested transform change: a value, or a function of the state it
/// will be applied to.
pub enum TransformUpdate {
    Set(TransformPatch),
    Map(Box<dyn FnOnce(&TransformState) -> TransformPatch>),
}

impl TransformUpdate {
    pub fn map(f: impl FnOnce(&TransformState) -> TransformPatch + 'static) -> Self {
        Self::Map(Box::new(f))
    }

    fn resolve(self, prev: &TransformState) -> TransformPatch {
        match self {
            Self::Set(patch) => patch,
            Self::Map(f) => f(prev),
        }
    }
}

impl std::fmt::Debug for TransformUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Set(patch) => f.debug_tuple("Set").field(patch).finish(),
            Self::Map(_) => f.write_str("Map(..)"),
        }
    }
}

impl From<TransformPatch> for TransformUpdate {
    fn from(patch: TransformPatch) -> Self {
        Self::Set(patch)
    }
}

impl From<TransformState> for TransformUpdate {
    fn from(state: TransformState) -> Self {
        Self::Set(state.into())
    }
}

fn first_finite(values: &[Option<f64>]) -> Option<f64> {
    values.iter().flatten().copied().find(|v| v.is_finite())
}

/// Merge a patch onto the previous state, repairing anything non-finite.
pub fn normalize(patch: TransformPatch, prev: &TransformState) -> TransformState {
    let zoom = first_finite(&[patch.zoom, Some(prev.zoom), Some(DEFAULT_ZOOM)])
        .unwrap_or(DEFAULT_ZOOM)
        .clamp(MIN_ZOOM, MAX_ZOOM);
    let x = first_finite(&[patch.pan_x, Some(prev.pan.x)]).unwrap_or(0.0);
    let y = first_finite(&[patch.pan_y, Some(prev.pan.y)]).unwrap_or(0.0);
    TransformState {
        zoom,
        pan: Point::new(x, y),
    }
}

/// Owns the transform for one editor session.
#[derive(Debug, Default)]
pub struct TransformStore {
    state: TransformState,
    /// Latest update requested since the last flush
    pending: Option<TransformUpdate>,
    /// A flush is scheduled for the next tick
    frame_requested: bool,
    torn_down: bool,
    stats: FrameStats,
}

impl TransformStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: TransformState) -> Self {
        let mut store = Self::default();
        store.state = normalize(state.into(), &TransformState::default());
        store
    }

    /// The most recently applied transform.
    #[inline]
    pub fn get(&self) -> TransformState {
        self.state
    }

    #[inline]
    pub fn zoom(&self) -> f64 {
        self.state.zoom
    }

    #[inline]
    pub fn pan(&self) -> Point {
        self.state.pan
    }

    /// Request an update for the next frame, replacing any update already
    /// waiting. Ignored after teardown.
    pub fn set_transform(&mut self, update: impl Into<TransformUpdate>) {
        if self.torn_down {
            debug!("transform update after teardown ignored");
            return;
        }
        if self.pending.replace(update.into()).is_some() {
            self.stats.record_coalesced();
        }
        self.frame_requested = true;
    }

    /// True if an update is waiting for the next tick.
    pub fn has_pending(&self) -> bool {
        self.frame_requested
    }

    /// Run one frame. Applies the pending update, if any, and reports
    /// whether the state changed.
    pub fn tick(&mut self) -> bool {
        profile_scope!("transform_tick");
        self.stats.record_tick();

        if !self.frame_requested {
            return false;
        }
        self.frame_requested = false;

        let Some(update) = self.pending.take() else {
            return false;
        };

        let patch = update.resolve(&self.state);
        let next = normalize(patch, &self.state);
        let changed = next != self.state;
        self.state = next;
        self.stats.record_applied();
        trace!(zoom = next.zoom, pan_x = next.pan.x, pan_y = next.pan.y, "transform flushed");

        // Something arrived while this one was being applied
        if self.pending.is_some() {
            self.frame_requested = true;
        }
        changed
    }

    /// Cancel any scheduled update. No update is applied afterwards.
    pub fn teardown(&mut self) {
        if self.pending.take().is_some() {
            debug!("pending transform update cancelled on teardown");
        }
        self.frame_requested = false;
        self.torn_down = true;
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }
}

impl Drop for TransformStore {
    fn drop(&mut self) {
        if !self.torn_down {
            self.teardown();
        }
    }
}
