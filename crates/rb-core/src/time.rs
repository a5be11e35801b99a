//! Simulation time model.
//!
//! # Design
//!
//! Time is a continuous quantity: inter-arrival gaps are sampled from
//! exponential and uniform distributions, so event timestamps are arbitrary
//! reals rather than tick multiples.  `SimTime` wraps an `f64` and supplies
//! the total order the event queue needs.
//!
//! Values are finite and non-negative by construction (`SimTime::new`
//! rejects everything else), which makes `f64::total_cmp` a plain numeric
//! comparison here — there are no NaNs to worry about and `Ord`/`Eq` are
//! safe to implement.

use std::cmp::Ordering;
use std::fmt;

/// An absolute point in simulated time, in seconds from the start of the run.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// Construct from raw seconds.
    ///
    /// # Panics
    /// Panics if `secs` is negative, NaN, or infinite — simulation time is a
    /// finite non-negative real by definition.
    pub fn new(secs: f64) -> SimTime {
        assert!(
            secs.is_finite() && secs >= 0.0,
            "SimTime must be a finite non-negative number, got {secs}"
        );
        SimTime(secs)
    }

    /// The time `delay` seconds after `self`.
    #[inline]
    pub fn after(self, delay: f64) -> SimTime {
        SimTime::new(self.0 + delay)
    }

    /// Seconds elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        debug_assert!(earlier <= self);
        self.0 - earlier.0
    }
}

impl Eq for SimTime {}

impl Ord for SimTime {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for SimTime {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.4}", self.0)
    }
}
