//! Structured trace events — a no-op-safe side channel.
//!
//! The simulation emits one [`TraceEvent`] per car lifecycle transition when
//! a recording sink is attached, and nothing at all otherwise.  Correctness
//! never depends on tracing; it exists for diagnostics and for the
//! invariant checks in the test suite (mutual exclusion, joint-grant
//! atomicity, whole-run determinism).

use std::cell::RefCell;
use std::rc::Rc;

use rb_core::{CarId, SimTime, SlotId};

/// What happened.
#[derive(Clone, Debug, PartialEq)]
pub enum TraceKind {
    /// A source created the car.
    Spawned,
    /// Every slot of the step is granted and the car starts crossing.
    Acquired { slots: Vec<SlotId>, compound: bool },
    /// The step's slot(s) were given back.
    Released { slots: Vec<SlotId>, compound: bool },
    /// The car left the roundabout.
    Finished,
}

/// One trace record.
#[derive(Clone, Debug, PartialEq)]
pub struct TraceEvent {
    pub time: SimTime,
    pub car: CarId,
    /// Path step index the event belongs to (0 for `Spawned`, the last
    /// step for `Finished`).
    pub step: usize,
    pub kind: TraceKind,
}

/// Cloneable handle to a shared trace buffer, or to nothing.
///
/// Cloning is cheap; every car and source in a run holds one.
#[derive(Clone)]
pub struct TraceSink {
    events: Option<Rc<RefCell<Vec<TraceEvent>>>>,
}

impl TraceSink {
    /// A sink that drops everything.
    pub fn disabled() -> TraceSink {
        TraceSink { events: None }
    }

    /// A sink that records into a shared buffer.
    pub fn recording() -> TraceSink {
        TraceSink {
            events: Some(Rc::new(RefCell::new(Vec::new()))),
        }
    }

    pub fn is_recording(&self) -> bool {
        self.events.is_some()
    }

    pub fn record(&self, event: TraceEvent) {
        if let Some(events) = &self.events {
            events.borrow_mut().push(event);
        }
    }

    /// Snapshot of everything recorded so far (empty for a disabled sink).
    pub fn events(&self) -> Vec<TraceEvent> {
        match &self.events {
            Some(events) => events.borrow().clone(),
            None => Vec::new(),
        }
    }
}
