//! `rb-spatial` — the ring-indexed spatial model of the roundabout.
//!
//! Everything in this crate is built once at setup and read-only afterwards:
//! the [`Ring`]s own their slots but never create or destroy them after
//! construction, and the [`ExitIndexTable`]s are pure arithmetic over the
//! ring length.  All dynamism (occupancy, wait queues) lives inside the
//! `rb-kernel` slots the rings contain.
//!
//! | Module       | Contents                                    |
//! |--------------|---------------------------------------------|
//! | [`ring`]     | `Ring<T>`, `slice_wrap`                     |
//! | [`exits`]    | `ExitBounds`, `ExitIndexTable`              |
//! | [`roundabout`] | `RoundAbout`                              |
//! | [`error`]    | `LayoutError`                               |

pub mod error;
pub mod exits;
pub mod ring;
pub mod roundabout;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::LayoutError;
pub use exits::{ExitBounds, ExitIndexTable};
pub use ring::{Ring, slice_wrap};
pub use roundabout::RoundAbout;
