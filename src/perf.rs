//! Performance instrumentation.
//!
//! Scoped timers for hot paths (settle ticks, spatial index maintenance)
//! and a rolling tick-time monitor. Zero-cost when the `profiling` feature
//! is disabled.
//!
//! Enable with the `profiling` feature flag and instrument blocks with:
//! ```ignore
//! use spaceboard::profile_scope;
//!
//! fn advance() {
//!     profile_scope!("settle_tick");
//!     // ... work ...
//! }
//! ```

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::warn;
#[cfg(feature = "profiling")]
use tracing::trace;

// ============================================================================
// Constants
// ============================================================================

/// Target simulation tick time for 60 Hz
pub const TARGET_TICK_MS: f64 = 16.67;

/// Number of samples to keep for rolling averages
const SAMPLE_COUNT: usize = 120;

/// Threshold multiplier for warning (2.0 = warn if a tick takes 2x target)
const WARN_THRESHOLD: f64 = 2.0;

/// Global flag to enable/disable profiling at runtime
static PROFILING_ENABLED: AtomicBool = AtomicBool::new(cfg!(feature = "profiling"));

/// Profile a scope with the given name. Zero-cost when profiling is
/// disabled.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::for_profiling($name);
        #[cfg(not(feature = "profiling"))]
        let _ = $name; // Suppress unused variable warning
    };
    ($name:expr, $threshold_ms:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name, $threshold_ms);
        #[cfg(not(feature = "profiling"))]
        let _ = ($name, $threshold_ms);
    };
}

pub use profile_scope;

pub fn set_profiling_enabled(enabled: bool) {
    PROFILING_ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_profiling_enabled() -> bool {
    PROFILING_ENABLED.load(Ordering::Relaxed)
}

/// RAII timer that logs its scope's duration on drop.
pub struct ScopedTimer {
    label: &'static str,
    threshold_ms: f64,
    start: Instant,
}

impl ScopedTimer {
    pub fn for_profiling(label: &'static str) -> Self {
        Self::new(label, TARGET_TICK_MS)
    }

    pub fn new(label: &'static str, threshold_ms: f64) -> Self {
        Self {
            label,
            threshold_ms,
            start: Instant::now(),
        }
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        if !is_profiling_enabled() {
            return;
        }
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        if elapsed_ms > self.threshold_ms {
            warn!(scope = self.label, elapsed_ms, "slow scope");
        } else {
            #[cfg(feature = "profiling")]
            trace!(scope = self.label, elapsed_ms, "scope timing");
        }
    }
}

/// Rolling window over simulation tick durations.
#[derive(Debug, Default)]
pub struct TickMonitor {
    samples: VecDeque<Duration>,
}

impl TickMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one tick duration. Warns when a tick blows well past the
    /// 60 Hz budget.
    pub fn record(&mut self, elapsed: Duration) {
        if self.samples.len() >= SAMPLE_COUNT {
            self.samples.pop_front();
        }
        self.samples.push_back(elapsed);

        let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
        if elapsed_ms > TARGET_TICK_MS * WARN_THRESHOLD {
            warn!(elapsed_ms, "simulation tick over budget");
        }
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn average_ms(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let total: f64 = self
            .samples
            .iter()
            .map(|d| d.as_secs_f64() * 1000.0)
            .sum();
        total / self.samples.len() as f64
    }

    pub fn max_ms(&self) -> f64 {
        self.samples
            .iter()
            .map(|d| d.as_secs_f64() * 1000.0)
            .fold(0.0, f64::max)
    }
}
