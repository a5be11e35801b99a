//! `rb-sim` — orchestration of a whole roundabout run.
//!
//! The [`SimBuilder`] validates a [`SimConfig`](rb_core::SimConfig), lays
//! out the roundabout, and spawns one [`CarSource`](rb_traffic::CarSource)
//! per direction pair; the resulting [`Simulation`] drives the kernel to the
//! horizon and turns the shared car records into per-source
//! [`SourceReport`]s.
//!
//! | Module       | Contents                                          |
//! |--------------|---------------------------------------------------|
//! | [`builder`]  | `SimBuilder`                                      |
//! | [`sim`]      | `Simulation`, `SourceHandle`                      |
//! | [`report`]   | `SourceReport`, `CarReport`, `CarOutcome`         |
//! | [`observer`] | `SimObserver`, `NoopObserver`                     |
//! | [`error`]    | `SimError`, `SimResult`                           |

pub mod builder;
pub mod error;
pub mod observer;
pub mod report;
pub mod sim;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use report::{CarOutcome, CarReport, SourceReport};
pub use sim::{Simulation, SourceHandle};
