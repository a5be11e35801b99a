//! Observer hooks for watching a run from the outside.

use rb_core::SimTime;

use crate::report::SourceReport;

/// Callbacks invoked by [`Simulation::run_observed`].
///
/// All methods default to no-ops so implementors only override what they
/// care about.
///
/// [`Simulation::run_observed`]: crate::sim::Simulation::run_observed
pub trait SimObserver {
    /// Called at each progress mark with the live spawn/finish tallies.
    fn on_progress(&mut self, _now: SimTime, _spawned: usize, _finished: usize) {}

    /// Called once after the run with the final per-source reports.
    fn on_run_end(&mut self, _now: SimTime, _reports: &[SourceReport]) {}
}

/// Observer that ignores everything.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
