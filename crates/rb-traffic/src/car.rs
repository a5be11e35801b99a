//! The `Car` process: drive a precomputed path step by step.
//!
//! A car is a four-state machine:
//!
//! ```text
//! Start ──▶ Waiting ──▶ Crossing ──▶ (next step: Waiting …) ──▶ Done
//!             ▲  │ request granted?     timer fired: release
//!             └──┘ not yet: stay parked until the slot wakes us
//! ```
//!
//! Suspension points are exactly the two the kernel offers: the grant wait
//! in `Waiting` and the slot-passing timer in `Crossing`.  Immediately
//! granted requests cost no simulated time — the state machine falls
//! straight through to `Crossing` within the same resume.

use std::cell::RefCell;
use std::rc::Rc;

use rb_core::{CarId, Exit, SimTime, TaskId};
use rb_kernel::{Acquisition, EventClass, KernelResult, Process, Scheduler, Step};

use crate::path::{PathStep, step_priority};
use crate::trace::{TraceEvent, TraceKind, TraceSink};

// ── CarRecord ─────────────────────────────────────────────────────────────────

/// Observable state of one car, shared between its process and its source.
///
/// `stop` stays `None` for a car still in transit when the simulation
/// horizon is reached — an unresolved completion time, reported as such and
/// never coerced to a number.
#[derive(Clone, Debug)]
pub struct CarRecord {
    pub id: CarId,
    pub ingress: Exit,
    pub egress: Exit,
    pub hops: u8,
    pub start: Option<SimTime>,
    pub stop: Option<SimTime>,
}

impl CarRecord {
    /// Seconds between joining and leaving the roundabout, or `None` for an
    /// unfinished traversal.
    pub fn total_time(&self) -> Option<f64> {
        match (self.start, self.stop) {
            (Some(start), Some(stop)) => Some(stop.since(start)),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.stop.is_some()
    }
}

/// A car record shared between the car process, its source, and the
/// simulation's reports.
pub type SharedCarRecord = Rc<RefCell<CarRecord>>;

// ── Car process ───────────────────────────────────────────────────────────────

enum DriveState {
    Start,
    Waiting { step: usize, hold: Acquisition },
    Crossing { step: usize, hold: Acquisition },
    Done,
}

/// The driving process for one car.
pub struct Car {
    record: SharedCarRecord,
    path: Vec<PathStep>,
    slot_passing_time: f64,
    trace: TraceSink,
    state: DriveState,
}

impl Car {
    /// `path` must be non-empty (guaranteed by `plan_path` for any valid
    /// exit pair).
    pub fn new(
        record: SharedCarRecord,
        path: Vec<PathStep>,
        slot_passing_time: f64,
        trace: TraceSink,
    ) -> Car {
        debug_assert!(!path.is_empty());
        Car {
            record,
            path,
            slot_passing_time,
            trace,
            state: DriveState::Start,
        }
    }

    fn id(&self) -> CarId {
        self.record.borrow().id
    }

    /// Issue the request(s) for `step` with its tagged priority.
    fn request_step(&self, step: usize, self_id: TaskId, sched: &mut Scheduler) -> Acquisition {
        let priority = step_priority(step);
        match &self.path[step] {
            PathStep::Single(slot) => Acquisition::single(slot, priority, self_id, sched),
            PathStep::Compound { outer, inner } => {
                Acquisition::joint(outer, inner, priority, self_id, sched)
            }
        }
    }
}

impl Process for Car {
    fn resume(&mut self, self_id: TaskId, sched: &mut Scheduler) -> KernelResult<Step> {
        loop {
            match std::mem::replace(&mut self.state, DriveState::Done) {
                DriveState::Start => {
                    self.record.borrow_mut().start = Some(sched.now());
                    log::debug!(
                        "{} {} joining: {} -> {} ({} steps)",
                        sched.now(),
                        self.id(),
                        self.record.borrow().ingress,
                        self.record.borrow().egress,
                        self.path.len()
                    );
                    let hold = self.request_step(0, self_id, sched);
                    self.state = DriveState::Waiting { step: 0, hold };
                }

                DriveState::Waiting { step, hold } => {
                    if !hold.ready() {
                        self.state = DriveState::Waiting { step, hold };
                        return Ok(Step::Suspended);
                    }
                    self.trace.record(TraceEvent {
                        time: sched.now(),
                        car: self.id(),
                        step,
                        kind: TraceKind::Acquired {
                            slots: hold.slot_ids(),
                            compound: hold.is_joint(),
                        },
                    });
                    log::trace!("{} {} acquired step {step}", sched.now(), self.id());
                    sched.schedule_after(self.slot_passing_time, EventClass::TIMER, self_id)?;
                    self.state = DriveState::Crossing { step, hold };
                    return Ok(Step::Suspended);
                }

                DriveState::Crossing { step, hold } => {
                    hold.release(sched)?;
                    self.trace.record(TraceEvent {
                        time: sched.now(),
                        car: self.id(),
                        step,
                        kind: TraceKind::Released {
                            slots: hold.slot_ids(),
                            compound: hold.is_joint(),
                        },
                    });

                    let next = step + 1;
                    if next == self.path.len() {
                        self.record.borrow_mut().stop = Some(sched.now());
                        self.trace.record(TraceEvent {
                            time: sched.now(),
                            car: self.id(),
                            step,
                            kind: TraceKind::Finished,
                        });
                        log::debug!("{} {} left the roundabout", sched.now(), self.id());
                        return Ok(Step::Done);
                    }
                    let hold = self.request_step(next, self_id, sched);
                    self.state = DriveState::Waiting { step: next, hold };
                }

                DriveState::Done => return Ok(Step::Done),
            }
        }
    }
}
