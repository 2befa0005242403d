//! Timing for the input hot paths.
//!
//! `send`, hit testing, marquee containment and truth reconciliation run on
//! every pointer event or sync. [`profile_scope!`] wraps them in a
//! [`ScopedTimer`] when the crate is built with `--features profiling`;
//! otherwise it expands to nothing.

use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{trace, warn};

/// Budget for handling one pointer event at 60 FPS
pub const TARGET_FRAME_MS: f64 = 16.67;

/// Threshold used by `profile_scope!` in profiling builds
const PROFILING_THRESHOLD_MS: f64 = 1.0;

static PROFILING_ENABLED: AtomicBool = AtomicBool::new(cfg!(feature = "profiling"));

thread_local! {
    static OPEN_SCOPES: Cell<usize> = const { Cell::new(0) };
}

/// Time the rest of the enclosing block. Compiles away without the
/// `profiling` feature.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _scope_timer = $crate::perf::ScopedTimer::for_profiling($name);
    };
    ($name:expr, $threshold_ms:expr) => {
        #[cfg(feature = "profiling")]
        let _scope_timer = $crate::perf::ScopedTimer::new($name, $threshold_ms);
    };
}

pub use profile_scope;

/// Toggle profiling output at runtime.
pub fn set_profiling_enabled(enabled: bool) {
    PROFILING_ENABLED.store(enabled, Ordering::Relaxed);
}

#[inline]
pub fn is_profiling_enabled() -> bool {
    PROFILING_ENABLED.load(Ordering::Relaxed)
}

/// Logs on drop when the scope ran longer than its threshold.
///
/// Nested timers indent their trace output by depth. Scopes over budget
/// are reported at `warn` when profiling is off and at `trace` when on.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: f64,
    depth: usize,
}

impl ScopedTimer {
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        let depth = OPEN_SCOPES.with(|open| open.replace(open.get() + 1));
        Self {
            name,
            start: Instant::now(),
            threshold_ms,
            depth,
        }
    }

    pub fn with_default_threshold(name: &'static str) -> Self {
        Self::new(name, TARGET_FRAME_MS)
    }

    pub fn for_profiling(name: &'static str) -> Self {
        Self::new(name, PROFILING_THRESHOLD_MS)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        OPEN_SCOPES.with(|open| open.set(open.get().saturating_sub(1)));

        let elapsed_ms = self.elapsed_ms();
        if elapsed_ms <= self.threshold_ms {
            return;
        }
        if is_profiling_enabled() {
            let indent = "  ".repeat(self.depth);
            trace!("{indent}{}: {elapsed_ms:.2}ms", self.name);
        } else {
            warn!(
                scope = self.name,
                elapsed_ms,
                threshold_ms = self.threshold_ms,
                "slow canvas operation"
            );
        }
    }
}

/// Run `f`, returning its result and how long it took in milliseconds.
#[inline]
pub fn measure<T>(f: impl FnOnce() -> T) -> (T, f64) {
    let timer = Instant::now();
    let value = f();
    (value, timer.elapsed().as_secs_f64() * 1000.0)
}
