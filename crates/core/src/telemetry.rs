//! Timing helpers for reporting per-iteration and whole-run cost.
//!
//! Provides an RAII phase scope and an iteration timer that doubles as an
//! [`IterationObserver`].

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::solver::{IterationObserver, IterationReport};

/// A profiling scope that measures elapsed time using RAII.
///
/// The elapsed time is logged at `trace` level when dropped.
pub struct ProfilerScope {
    start: Instant,
    name: &'static str,
}

impl ProfilerScope {
    /// Creates a new profiling scope.
    pub fn new(name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            name,
        }
    }

    /// Gets elapsed time in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for ProfilerScope {
    fn drop(&mut self) {
        trace!(phase = self.name, elapsed_ms = self.elapsed_ms(), "phase finished");
    }
}

/// Collects the duration of every completed sweep
#[derive(Debug, Default, Clone)]
pub struct IterationTimer {
    durations: Vec<Duration>,
}

impl IterationTimer {
    /// Creates an empty timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one sweep.
    pub fn record(&mut self, elapsed: Duration) {
        self.durations.push(elapsed);
    }

    /// All recorded sweep durations, in order.
    pub fn durations(&self) -> &[Duration] {
        &self.durations
    }

    /// Gets the last recorded sweep time.
    pub fn last(&self) -> Option<Duration> {
        self.durations.last().copied()
    }

    /// Totals and average over everything recorded so far.
    pub fn summary(&self) -> RunSummary {
        let total: Duration = self.durations.iter().sum();
        RunSummary::new(self.durations.len(), total)
    }
}

impl IterationObserver for IterationTimer {
    fn on_iteration(&mut self, report: &IterationReport<'_>) {
        self.record(report.elapsed);
    }
}

/// Final run report
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Completed sweeps
    pub iterations: usize,
    /// Total compute time in seconds
    pub total_secs: f64,
    /// Mean compute time per sweep in seconds (0 when nothing ran)
    pub average_secs: f64,
}

impl RunSummary {
    /// Build a summary from a sweep count and the summed time
    pub fn new(iterations: usize, total: Duration) -> Self {
        let total_secs = total.as_secs_f64();
        let average_secs = if iterations == 0 {
            0.0
        } else {
            total_secs / iterations as f64
        };
        Self {
            iterations,
            total_secs,
            average_secs,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stop after {} iterations, elapsed time: {:.6}, average computation time: {:.6}",
            self.iterations, self.total_secs, self.average_secs
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::thread;

    #[test]
    fn test_profiler_scope_measures_time() {
        let scope = ProfilerScope::new("test");
        thread::sleep(Duration::from_millis(10));
        let elapsed = scope.elapsed_ms();
        assert!(elapsed >= 10.0, "Expected at least 10ms, got {elapsed}");
    }

    #[test]
    fn test_iteration_timer_summary() {
        let mut timer = IterationTimer::new();
        assert_eq!(timer.last(), None);

        timer.record(Duration::from_millis(100));
        timer.record(Duration::from_millis(300));
        assert_eq!(timer.last(), Some(Duration::from_millis(300)));

        let summary = timer.summary();
        assert_eq!(summary.iterations, 2);
        assert_relative_eq!(summary.total_secs, 0.4, epsilon = 1e-9);
        assert_relative_eq!(summary.average_secs, 0.2, epsilon = 1e-9);
    }

    #[test]
    fn test_empty_summary_has_zero_average() {
        let summary = IterationTimer::new().summary();
        assert_eq!(summary.iterations, 0);
        assert_eq!(summary.average_secs, 0.0);
    }

    #[test]
    fn test_summary_display() {
        let summary = RunSummary::new(4, Duration::from_secs(2));
        assert_eq!(
            summary.to_string(),
            "Stop after 4 iterations, elapsed time: 2.000000, average computation time: 0.500000"
        );
    }
}
