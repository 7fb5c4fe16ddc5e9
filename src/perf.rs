//! Lightweight performance instrumentation.
//!
//! Timings go through `tracing` at debug level, so they only show up when a
//! log file is configured and `--perf` is on.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

static ENABLED: AtomicBool = AtomicBool::new(false);

/// Logs the time between its creation and drop.
#[derive(Debug)]
pub struct Scope {
    name: &'static str,
    start: Instant,
}

impl Drop for Scope {
    fn drop(&mut self) {
        if !is_enabled() {
            return;
        }
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        tracing::debug!(target: "ctek::perf", scope = self.name, elapsed_ms, "timing");
    }
}

pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

pub fn scope(name: &'static str) -> Scope {
    Scope {
        name,
        start: Instant::now(),
    }
}

/// Record a one-off event with free-form detail.
pub fn log_event(name: &str, detail: impl AsRef<str>) {
    if !is_enabled() {
        return;
    }
    tracing::debug!(target: "ctek::perf", event = name, detail = detail.as_ref());
}
