//! `rb-traffic` — vehicles and the traffic they make.
//!
//! A [`CarSource`] spawns [`Car`]s at stochastic intervals; each car plans
//! its whole slot path once (a pure function of its ingress/egress pair and
//! the roundabout's exit tables) and then drives it step by step as a
//! cooperative kernel process: request the step's slot(s), hold for the
//! slot-passing time, release, advance.
//!
//! | Module       | Contents                                          |
//! |--------------|---------------------------------------------------|
//! | [`path`]     | `PathStep`, `plan_path`, `step_priority`          |
//! | [`car`]      | `CarRecord`, the `Car` process                    |
//! | [`source`]   | `CarSource`, `CarIdGen`                           |
//! | [`arrivals`] | `ArrivalDistribution`, `ArrivalTable`             |
//! | [`trace`]    | `TraceEvent`, `TraceSink`                         |
//! | [`error`]    | `PathError`                                       |

pub mod arrivals;
pub mod car;
pub mod error;
pub mod path;
pub mod source;
pub mod trace;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use arrivals::{ArrivalDistribution, ArrivalTable};
pub use car::{Car, CarRecord, SharedCarRecord};
pub use error::PathError;
pub use path::{PathStep, plan_path, step_priority};
pub use source::{CarIdGen, CarSource, SpawnedCars};
pub use trace::{TraceEvent, TraceKind, TraceSink};
