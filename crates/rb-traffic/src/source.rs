//! `CarSource`: one generator process per (ingress, egress) direction pair.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rb_core::{CarId, Exit, SourceRng};
use rb_kernel::{EventClass, KernelResult, Process, Scheduler, Step, TaskId};
use rb_spatial::RoundAbout;

use crate::arrivals::ArrivalDistribution;
use crate::car::{Car, CarRecord, SharedCarRecord};
use crate::error::PathError;
use crate::path::{PathStep, plan_path};
use crate::trace::{TraceEvent, TraceKind, TraceSink};

// ── CarIdGen ──────────────────────────────────────────────────────────────────

/// Shared monotone car-identity sequence, owned by the simulation and handed
/// to every source.  Ids are allocated in spawn order across all sources,
/// which keeps them globally unique without any process-wide mutable state.
#[derive(Clone, Default)]
pub struct CarIdGen(Rc<Cell<u32>>);

impl CarIdGen {
    pub fn new() -> CarIdGen {
        CarIdGen::default()
    }

    pub fn next_id(&self) -> CarId {
        let id = self.0.get();
        self.0.set(id + 1);
        CarId(id)
    }
}

// ── CarSource ─────────────────────────────────────────────────────────────────

/// The list of cars a source has spawned, shared with the simulation for
/// post-run inspection by the statistics layer.
pub type SpawnedCars = Rc<RefCell<Vec<SharedCarRecord>>>;

/// Spawns cars for one direction pair at stochastic intervals.
///
/// On its first resume the source waits half its distribution's mean — with
/// twelve sources this spreads the first arrivals out instead of firing them
/// all at time zero.  From then on it loops forever: spawn one car, sample
/// the next gap, suspend.  A source never finishes; at the horizon it is
/// simply never resumed again.
pub struct CarSource {
    ingress: Exit,
    egress: Exit,
    hops: u8,
    /// Planned once; every spawned car drives a clone of these steps.
    path: Vec<PathStep>,
    distribution: ArrivalDistribution,
    slot_passing_time: f64,
    rng: SourceRng,
    ids: CarIdGen,
    spawned: SpawnedCars,
    trace: TraceSink,
    warmed_up: bool,
}

impl CarSource {
    /// Fails fast on the reflexive pair (`ingress == egress`), which is a
    /// configuration error, not something to discover at first spawn.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        roundabout: &RoundAbout,
        ingress: Exit,
        egress: Exit,
        distribution: ArrivalDistribution,
        slot_passing_time: f64,
        rng: SourceRng,
        ids: CarIdGen,
        trace: TraceSink,
    ) -> Result<CarSource, PathError> {
        let path = plan_path(roundabout, ingress, egress)?;
        Ok(CarSource {
            ingress,
            egress,
            hops: ingress.hops_to(egress),
            path,
            distribution,
            slot_passing_time,
            rng,
            ids,
            spawned: Rc::new(RefCell::new(Vec::new())),
            trace,
            warmed_up: false,
        })
    }

    /// Handle to the source's spawn list, valid after the source itself has
    /// been moved into the scheduler.
    pub fn spawned(&self) -> SpawnedCars {
        self.spawned.clone()
    }

    fn spawn_car(&mut self, sched: &mut Scheduler) -> KernelResult<()> {
        let id = self.ids.next_id();
        let record: SharedCarRecord = Rc::new(RefCell::new(CarRecord {
            id,
            ingress: self.ingress,
            egress: self.egress,
            hops: self.hops,
            start: None,
            stop: None,
        }));
        self.spawned.borrow_mut().push(record.clone());
        self.trace.record(TraceEvent {
            time: sched.now(),
            car: id,
            step: 0,
            kind: TraceKind::Spawned,
        });
        log::debug!(
            "{} {} spawned for {} -> {}",
            sched.now(),
            id,
            self.ingress,
            self.egress
        );

        let car = Car::new(
            record,
            self.path.clone(),
            self.slot_passing_time,
            self.trace.clone(),
        );
        let task = sched.spawn(Box::new(car));
        sched.schedule_after(0.0, EventClass::TIMER, task)
    }
}

impl Process for CarSource {
    fn resume(&mut self, self_id: TaskId, sched: &mut Scheduler) -> KernelResult<Step> {
        if !self.warmed_up {
            self.warmed_up = true;
            let warm_up = self.distribution.mean() / 2.0;
            sched.schedule_after(warm_up, EventClass::TIMER, self_id)?;
            return Ok(Step::Suspended);
        }

        self.spawn_car(sched)?;
        let gap = self.distribution.sample(&mut self.rng);
        sched.schedule_after(gap, EventClass::TIMER, self_id)?;
        Ok(Step::Suspended)
    }
}
