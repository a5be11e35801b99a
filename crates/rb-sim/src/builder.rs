//! `SimBuilder`: validate a configuration and wire up a runnable simulation.

use std::rc::Rc;

use rb_core::{Exit, SimConfig, SourceId, SourceRng};
use rb_kernel::{EventClass, Scheduler};
use rb_spatial::RoundAbout;
use rb_traffic::{ArrivalTable, CarIdGen, CarSource, PathError, TraceSink};

use crate::error::SimResult;
use crate::sim::{Simulation, SourceHandle};

/// Every ordered (ingress, egress) pair with a drivable path: four ingresses
/// times three non-reflexive egresses.
fn all_pairs() -> Vec<(Exit, Exit)> {
    let mut pairs = Vec::with_capacity(12);
    for &ingress in &Exit::ALL {
        for hops in 1..=3u8 {
            pairs.push((ingress, ingress.offset(hops)));
        }
    }
    pairs
}

/// Builder for a [`Simulation`].
///
/// ```no_run
/// use rb_core::SimConfig;
/// use rb_sim::SimBuilder;
///
/// let mut sim = SimBuilder::new(SimConfig::default()).build().unwrap();
/// sim.run().unwrap();
/// ```
pub struct SimBuilder {
    config: SimConfig,
    arrivals: ArrivalTable,
    pairs: Option<Vec<(Exit, Exit)>>,
    trace: TraceSink,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> SimBuilder {
        SimBuilder {
            config,
            arrivals: ArrivalTable::default(),
            pairs: None,
            trace: TraceSink::disabled(),
        }
    }

    /// Replace the default (measured) arrival table.
    pub fn arrival_table(mut self, arrivals: ArrivalTable) -> SimBuilder {
        self.arrivals = arrivals;
        self
    }

    /// Restrict the simulation to the given direction pairs.  The default is
    /// all twelve drivable pairs.
    pub fn sources(mut self, pairs: &[(Exit, Exit)]) -> SimBuilder {
        self.pairs = Some(pairs.to_vec());
        self
    }

    /// Attach a trace sink.  Recording sinks capture every car lifecycle
    /// event; the default disabled sink costs nothing.
    pub fn trace(mut self, trace: TraceSink) -> SimBuilder {
        self.trace = trace;
        self
    }

    /// Validate, lay out the roundabout, and spawn one source process per
    /// direction pair, each with its own decorrelated RNG stream.
    pub fn build(self) -> SimResult<Simulation> {
        self.config.validate()?;
        let roundabout = Rc::new(RoundAbout::new(self.config.inner_len, self.config.outer_len)?);

        let mut sched = Scheduler::new();
        let ids = CarIdGen::new();
        let pairs = self.pairs.unwrap_or_else(all_pairs);
        let mut sources = Vec::with_capacity(pairs.len());

        for (i, &(ingress, egress)) in pairs.iter().enumerate() {
            if ingress == egress {
                return Err(PathError::UTurn(ingress).into());
            }
            let id = SourceId(i as u16);
            let hops = ingress.hops_to(egress);
            let source = CarSource::new(
                &roundabout,
                ingress,
                egress,
                self.arrivals.distribution(ingress, hops).clone(),
                self.config.slot_passing_time,
                SourceRng::new(self.config.seed, id),
                ids.clone(),
                self.trace.clone(),
            )?;
            let cars = source.spawned();

            let task = sched.spawn(Box::new(source));
            sched.schedule_after(0.0, EventClass::TIMER, task)?;
            log::debug!("source {id}: {ingress} -> {egress} ({hops} hops)");

            sources.push(SourceHandle {
                id,
                ingress,
                egress,
                cars,
            });
        }

        Ok(Simulation::new(
            self.config,
            sched,
            roundabout,
            sources,
            self.trace,
        ))
    }
}
