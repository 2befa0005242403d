//! Unit tests for the timing helpers.

use swimlane_canvas::perf::{
    ScopedTimer, TARGET_FRAME_MS, is_profiling_enabled, measure, set_profiling_enabled,
};

#[test]
fn test_measure_returns_value_and_duration() {
    let (value, elapsed) = measure(|| (1..=10).sum::<u32>());
    assert_eq!(value, 55);
    assert!(elapsed >= 0.0);
}

#[test]
fn test_scoped_timer_reports_name() {
    let timer = ScopedTimer::with_default_threshold("unit_timer");
    assert_eq!(timer.name(), "unit_timer");
    assert!(timer.elapsed_ms() < TARGET_FRAME_MS * 100.0);
}

#[test]
fn test_profiling_toggle() {
    let before = is_profiling_enabled();
    set_profiling_enabled(true);
    assert!(is_profiling_enabled());
    set_profiling_enabled(false);
    assert!(!is_profiling_enabled());
    set_profiling_enabled(before);
}
