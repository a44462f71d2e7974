//! Per-iteration hook for external collaborators (renderers, telemetry)

use std::time::Duration;

use crate::grid::TemperatureField;

/// Snapshot handed to observers after each completed sweep
#[derive(Debug, Clone, Copy)]
pub struct IterationReport<'a> {
    /// 1-based index of the sweep that just finished
    pub iteration: usize,
    /// Wall-clock time spent in the sweep (diffusion, fire and wall phases)
    pub elapsed: Duration,
    /// Buffer written by the sweep
    pub field: &'a TemperatureField,
}

/// Receives every finished buffer, read-only
///
/// Observers run on the caller's thread between sweeps and cannot modify the
/// simulation state.
pub trait IterationObserver {
    /// Called once per completed sweep
    fn on_iteration(&mut self, report: &IterationReport<'_>);
}

impl IterationObserver for () {
    fn on_iteration(&mut self, _report: &IterationReport<'_>) {}
}

impl<O: IterationObserver + ?Sized> IterationObserver for &mut O {
    fn on_iteration(&mut self, report: &IterationReport<'_>) {
        (**self).on_iteration(report);
    }
}

impl<A: IterationObserver, B: IterationObserver> IterationObserver for (A, B) {
    fn on_iteration(&mut self, report: &IterationReport<'_>) {
        self.0.on_iteration(report);
        self.1.on_iteration(report);
    }
}
