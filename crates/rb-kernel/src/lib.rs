//! `rb-kernel` — the discrete-event simulation kernel.
//!
//! # Execution model
//!
//! The kernel is single-threaded and cooperative: exactly one logical process
//! runs at any simulated instant.  Processes are explicit state machines
//! implementing [`Process`]; every suspension point in their logic (a timed
//! wait or a slot-acquisition wait) becomes a return of [`Step::Suspended`],
//! and the [`Scheduler`] resumes them later from a time-ordered event queue.
//! Because only the currently-resumed process ever touches shared state, no
//! locking exists anywhere in the kernel.
//!
//! # Event ordering
//!
//! Events are keyed `(time, class, sequence)`: earlier wake-times first,
//! lower class rank first among equal times, FIFO by insertion sequence among
//! equal ranks.  The sequence tiebreak is what makes a whole run
//! deterministic for a fixed seed and configuration.
//!
//! | Module        | Contents                                          |
//! |---------------|---------------------------------------------------|
//! | [`event`]     | `Event` key, `EventClass`                         |
//! | [`scheduler`] | `Scheduler`, `Process`, `Step`                    |
//! | [`slot`]      | `Slot`, `SlotRequest`, `Acquisition`, `WakeTarget`|
//! | [`error`]     | `KernelError`, `KernelResult`                     |

pub mod error;
pub mod event;
pub mod scheduler;
pub mod slot;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{KernelError, KernelResult};
pub use event::EventClass;
pub use rb_core::TaskId;
pub use scheduler::{Process, Scheduler, Step};
pub use slot::{Acquisition, Slot, SlotRequest, WakeTarget};
