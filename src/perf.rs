//! Performance instrumentation.
//!
//! Two pieces:
//!
//! - **Scoped timers**: `profile_scope!` times a block and warns through
//!   `tracing` when it overruns. Zero-cost unless the `profiling` feature is on.
//! - **Frame statistics**: [`FrameStats`] counts render ticks, transform
//!   updates that were applied, and updates that were superseded before
//!   their frame arrived.
//!
//! ```ignore
//! use schemacanvas::profile_scope;
//!
//! fn handle_pointer_move() {
//!     profile_scope!("handle_pointer_move");
//!     // ... event handling code ...
//! }
//! ```

use std::time::Instant;
use tracing::warn;

// ============================================================================
// Constants
// ============================================================================

/// Target frame time for 60 FPS
pub const TARGET_FRAME_MS: f64 = 16.67;

/// Default overrun threshold for scoped timers
const DEFAULT_THRESHOLD_MS: f64 = 2.0;

// ============================================================================
// Profiling Macros (zero-cost when disabled)
// ============================================================================

/// Profile a scope with the given name. Zero-cost when profiling is disabled.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::for_profiling($name);
        #[cfg(not(feature = "profiling"))]
        let _ = $name;
    };
    ($name:expr, $threshold_ms:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name, $threshold_ms);
        #[cfg(not(feature = "profiling"))]
        let _ = ($name, $threshold_ms);
    };
}

pub use profile_scope;

// ============================================================================
// Scoped Timer
// ============================================================================

/// Times its own lifetime and warns if it exceeds a threshold.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: f64,
}

impl ScopedTimer {
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        Self {
            name,
            start: Instant::now(),
            threshold_ms,
        }
    }

    /// Timer with the default hot-path threshold.
    pub fn for_profiling(name: &'static str) -> Self {
        Self::new(name, DEFAULT_THRESHOLD_MS)
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let ms = self.elapsed_ms();
        if ms > self.threshold_ms {
            warn!(
                operation = self.name,
                elapsed_ms = format!("{:.2}", ms),
                threshold_ms = format!("{:.2}", self.threshold_ms),
                "Slow operation"
            );
        }
    }
}

// ============================================================================
// Frame Statistics
// ============================================================================

/// Counters for the transform flush cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameStats {
    ticks: u64,
    applied: u64,
    coalesced: u64,
}

impl FrameStats {
    pub fn record_tick(&mut self) {
        self.ticks += 1;
    }

    pub fn record_applied(&mut self) {
        self.applied += 1;
    }

    /// An update was replaced by a newer one before it was applied.
    pub fn record_coalesced(&mut self) {
        self.coalesced += 1;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn applied(&self) -> u64 {
        self.applied
    }

    pub fn coalesced(&self) -> u64 {
        self.coalesced
    }

    /// Fraction of requested updates that never reached the screen.
    pub fn coalesced_ratio(&self) -> f64 {
        let requested = self.applied + self.coalesced;
        if requested == 0 {
            0.0
        } else {
            self.coalesced as f64 / requested as f64
        }
    }
}
