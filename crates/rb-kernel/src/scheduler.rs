//! The `Scheduler`: clock, event queue, and the cooperative task slab.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rb_core::{SimTime, TaskId};

use crate::error::{KernelError, KernelResult};
use crate::event::{Event, EventClass};

// ── Process ───────────────────────────────────────────────────────────────────

/// What a process reports after being resumed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// The process parked itself again (on a timer or a slot grant) and will
    /// be resumed by a later event.
    Suspended,
    /// The process ran to completion; its slab entry is retired.
    Done,
}

/// A suspended simulation process, written as an explicit state machine.
///
/// `resume` is called once per delivered event.  Inside it the process may
/// advance the state machine through any number of *synchronous* steps
/// (immediately-granted slot requests cost no simulated time), schedule new
/// events, request and release slots, and spawn new processes — this is the
/// only point where new events enter the queue.
pub trait Process {
    fn resume(&mut self, self_id: TaskId, sched: &mut Scheduler) -> KernelResult<Step>;
}

// ── Scheduler ─────────────────────────────────────────────────────────────────

/// Global clock plus the time-ordered queue of pending wakeups.
///
/// Owns every process in the run.  During `run`, the due process is moved out
/// of the slab before `resume` is called, so the process body holds the only
/// `&mut` to itself and may freely mutate the scheduler it was handed.
pub struct Scheduler {
    now: SimTime,
    queue: BinaryHeap<Reverse<Event>>,
    seq: u64,
    /// Task slab.  Entries of finished tasks stay `None`; `TaskId`s are
    /// never reused within a run.
    tasks: Vec<Option<Box<dyn Process>>>,
}

impl Scheduler {
    pub fn new() -> Scheduler {
        Scheduler {
            now: SimTime::ZERO,
            queue: BinaryHeap::new(),
            seq: 0,
            tasks: Vec::new(),
        }
    }

    /// Current simulation time.  Advanced only when the queue is popped.
    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Globally unique, monotonically increasing sequence number.  Shared by
    /// the event queue and slot wait-queues so "arrival order" means the same
    /// thing everywhere.
    pub(crate) fn next_seq(&mut self) -> u64 {
        let s = self.seq;
        self.seq += 1;
        s
    }

    /// Register a process.  It runs only once an event addresses it; use
    /// [`schedule_after`](Self::schedule_after) with delay 0 to start it at
    /// the current instant.
    pub fn spawn(&mut self, process: Box<dyn Process>) -> TaskId {
        let id = TaskId(self.tasks.len() as u32);
        self.tasks.push(Some(process));
        id
    }

    /// Enqueue a wakeup for `task` at `now + delay`.
    pub fn schedule_after(
        &mut self,
        delay: f64,
        class: EventClass,
        task: TaskId,
    ) -> KernelResult<()> {
        if !(delay.is_finite() && delay >= 0.0) {
            return Err(KernelError::InvalidDelay(delay));
        }
        if task.index() >= self.tasks.len() {
            return Err(KernelError::UnknownTask(task));
        }
        let event = Event {
            time: self.now.after(delay),
            class,
            seq: self.next_seq(),
            task,
        };
        self.queue.push(Reverse(event));
        Ok(())
    }

    /// Number of undelivered events (including any left behind by a
    /// truncated run).
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Drive the queue until it is empty or the clock would exceed `until`.
    ///
    /// Each iteration pops the earliest-ordered event, advances the clock to
    /// its time, and resumes exactly one process.  Events beyond `until` are
    /// left in the queue: a process that is mid-flight when the horizon is
    /// reached stays suspended permanently.
    pub fn run(&mut self, until: SimTime) -> KernelResult<()> {
        loop {
            let next_time = match self.queue.peek() {
                None => break,
                Some(Reverse(ev)) => ev.time,
            };
            if next_time > until {
                break;
            }

            let Reverse(event) = self.queue.pop().expect("peeked event vanished");
            if event.time < self.now {
                return Err(KernelError::TimeRegression {
                    event: event.time,
                    clock: self.now,
                });
            }
            self.now = event.time;

            let Some(mut process) = self.tasks[event.task.index()].take() else {
                return Err(KernelError::UnknownTask(event.task));
            };
            log::trace!("{} resuming {}", self.now, event.task);
            match process.resume(event.task, self)? {
                Step::Suspended => self.tasks[event.task.index()] = Some(process),
                Step::Done => {}
            }
        }
        Ok(())
    }

    /// Inject a raw event, bypassing the monotonicity guarantee of
    /// `schedule_after`.  Only for exercising the regression check.
    #[cfg(test)]
    pub(crate) fn push_event_at(&mut self, time: SimTime, class: EventClass, task: TaskId) {
        let seq = self.next_seq();
        self.queue.push(Reverse(Event { time, class, seq, task }));
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Scheduler::new()
    }
}
