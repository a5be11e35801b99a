//! The `Simulation`: a configured scheduler plus the handles to read results.

use std::rc::Rc;

use rb_core::{Exit, SimConfig, SimTime, SourceId};
use rb_spatial::RoundAbout;
use rb_traffic::{SpawnedCars, TraceSink};

use crate::error::SimResult;
use crate::observer::SimObserver;
use crate::report::{CarReport, SourceReport};

/// Post-build handle to one car source: its identity and the shared list of
/// every car it spawns.  The source process itself lives inside the
/// scheduler and is never touched directly again.
pub struct SourceHandle {
    pub id: SourceId,
    pub ingress: Exit,
    pub egress: Exit,
    pub(crate) cars: SpawnedCars,
}

/// A fully wired simulation, ready to run once.
///
/// Built by [`SimBuilder`](crate::builder::SimBuilder).  Running past the
/// horizon truncates: cars still in transit keep their records but their
/// completion time stays unresolved.
pub struct Simulation {
    config: SimConfig,
    sched: rb_kernel::Scheduler,
    roundabout: Rc<RoundAbout>,
    sources: Vec<SourceHandle>,
    trace: TraceSink,
}

impl Simulation {
    pub(crate) fn new(
        config: SimConfig,
        sched: rb_kernel::Scheduler,
        roundabout: Rc<RoundAbout>,
        sources: Vec<SourceHandle>,
        trace: TraceSink,
    ) -> Simulation {
        Simulation {
            config,
            sched,
            roundabout,
            sources,
            trace,
        }
    }

    /// Drive the event queue until the configured horizon.
    pub fn run(&mut self) -> SimResult<()> {
        log::info!(
            "running to horizon {} with {} sources",
            self.config.horizon,
            self.sources.len()
        );
        self.sched.run(SimTime::new(self.config.horizon))?;
        log::info!(
            "run ended at {}: {} cars spawned, {} finished",
            self.sched.now(),
            self.spawned_count(),
            self.finished_count()
        );
        Ok(())
    }

    /// Like [`run`](Simulation::run), but pauses at every `interval` of
    /// simulated time to report progress, and hands the final reports to the
    /// observer when the horizon is reached.
    pub fn run_observed<O: SimObserver>(
        &mut self,
        interval: f64,
        observer: &mut O,
    ) -> SimResult<()> {
        if !(interval > 0.0 && interval.is_finite()) {
            return Err(rb_core::RbError::Config(format!(
                "progress interval must be a positive duration, got {interval}"
            ))
            .into());
        }
        let mut mark = interval;
        while mark < self.config.horizon {
            self.sched.run(SimTime::new(mark))?;
            observer.on_progress(self.sched.now(), self.spawned_count(), self.finished_count());
            mark += interval;
        }
        self.run()?;
        let reports = self.reports();
        observer.on_run_end(self.sched.now(), &reports);
        Ok(())
    }

    /// The simulated clock, which never exceeds the horizon.
    pub fn now(&self) -> SimTime {
        self.sched.now()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The laid-out roundabout the run drives over.
    pub fn roundabout(&self) -> &RoundAbout {
        &self.roundabout
    }

    pub fn trace(&self) -> &TraceSink {
        &self.trace
    }

    /// Cars spawned so far, across all sources.
    pub fn spawned_count(&self) -> usize {
        self.sources.iter().map(|s| s.cars.borrow().len()).sum()
    }

    /// Cars that completed their traversal so far.
    pub fn finished_count(&self) -> usize {
        self.sources
            .iter()
            .map(|s| {
                s.cars
                    .borrow()
                    .iter()
                    .filter(|c| c.borrow().is_finished())
                    .count()
            })
            .sum()
    }

    /// Snapshot every source's cars into owned reports.
    pub fn reports(&self) -> Vec<SourceReport> {
        self.sources
            .iter()
            .map(|s| SourceReport {
                source: s.id,
                ingress: s.ingress,
                egress: s.egress,
                cars: s
                    .cars
                    .borrow()
                    .iter()
                    .map(|record| CarReport::from_record(&record.borrow()))
                    .collect(),
            })
            .collect()
    }
}
