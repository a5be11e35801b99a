//! Kernel error taxonomy.
//!
//! Everything here is a protocol violation or a bad argument — fatal,
//! indicating a bug in either the kernel or a process driving it, never a
//! condition a correct simulation recovers from.  Expected outcomes like an
//! unfinished traversal at the horizon are *not* errors and never appear
//! here; they are represented in the data model instead.

use rb_core::{SimTime, SlotId, TaskId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KernelError {
    /// The event queue produced an event timestamped before the clock.
    /// Simulation time is monotone; this can only mean queue corruption.
    #[error("popped event at {event} precedes the clock at {clock}")]
    TimeRegression { event: SimTime, clock: SimTime },

    /// `schedule_after` was called with a negative, NaN, or infinite delay.
    #[error("delay must be finite and non-negative, got {0}")]
    InvalidDelay(f64),

    /// A slot request was released without ever having been granted.
    #[error("slot {0} released by a request that was never granted")]
    ReleaseWithoutGrant(SlotId),

    /// An event addressed a task slab entry that does not exist or has
    /// already finished.  Correct processes never leave dangling wakeups.
    #[error("event addressed to unknown or finished task {0}")]
    UnknownTask(TaskId),
}

pub type KernelResult<T> = Result<T, KernelError>;
