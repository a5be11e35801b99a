//! `rb-core` — foundational types for the `rust_rb` roundabout simulator.
//!
//! This crate is a dependency of every other `rb-*` crate.  It intentionally
//! has no `rb-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`ids`]      | `CarId`, `TaskId`, `SlotId`, `SourceId`               |
//! | [`time`]     | `SimTime` — continuous simulation time                |
//! | [`priority`] | `Priority` — the two right-of-way classes             |
//! | [`exit`]     | `Exit` — the four compass access points               |
//! | [`config`]   | `SimConfig` and its validation                        |
//! | [`rng`]      | `SourceRng` (per-source deterministic RNG)            |
//! | [`error`]    | `RbError`, `RbResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                               |
//! |---------|------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.  |

pub mod config;
pub mod error;
pub mod exit;
pub mod ids;
pub mod priority;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SimConfig;
pub use error::{RbError, RbResult};
pub use exit::Exit;
pub use ids::{CarId, SlotId, SourceId, TaskId};
pub use priority::Priority;
pub use rng::SourceRng;
pub use time::SimTime;
