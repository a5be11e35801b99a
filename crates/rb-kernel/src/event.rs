//! Event keys for the scheduler's queue.

use rb_core::{Priority, SimTime, TaskId};

/// Ordering class of an event among others at the same instant.
///
/// Lower values are delivered first.  Timer expiries use [`EventClass::TIMER`]
/// (class 0); slot-grant wakeups carry the rank of the granted request's
/// [`Priority`] (1 for circulating, 2 for joining).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventClass(pub u8);

impl EventClass {
    /// Class for plain timed waits.
    pub const TIMER: EventClass = EventClass(0);
}

impl From<Priority> for EventClass {
    #[inline]
    fn from(p: Priority) -> EventClass {
        EventClass(p.rank())
    }
}

/// One pending wakeup.  Destroyed when delivered.
///
/// The derived `Ord` compares `(time, class, seq)` lexicographically, which
/// is exactly the delivery order: time first, class rank among equal times,
/// FIFO insertion order among equal ranks.  `seq` is globally unique so the
/// trailing `task` field never participates in a comparison.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Event {
    pub time: SimTime,
    pub class: EventClass,
    pub seq: u64,
    pub task: TaskId,
}
