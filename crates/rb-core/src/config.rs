//! Top-level simulation configuration.
//!
//! Typically filled in by the application crate (constants, a sweep driver,
//! or a config file) and validated once before anything is constructed.
//! Every check here is a fatal configuration error per the error taxonomy:
//! a roundabout with a ring shorter than 16 slots or a length that doesn't
//! divide into four equal quarter-arcs cannot be laid out at all.

use crate::error::{RbError, RbResult};

/// Smallest ring that still leaves at least 3 slots per quarter-arc after
/// the exit-boundary offsets are applied.
pub const MIN_RING_LEN: usize = 16;

/// Top-level simulation configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Number of slots in the inner circle.  ≥ 16, multiple of 4.
    pub inner_len: usize,

    /// Number of slots in the outer circle.  ≥ 16, multiple of 4.
    pub outer_len: usize,

    /// Seconds a car needs to cross one slot-length of road.  The same
    /// duration is used for every slot in both rings.
    pub slot_passing_time: f64,

    /// Simulated time at which the run stops, regardless of cars still in
    /// transit (their completion time stays unresolved).
    pub horizon: f64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl SimConfig {
    /// Check every construction-time invariant, returning the first failure.
    pub fn validate(&self) -> RbResult<()> {
        for (name, len) in [("inner", self.inner_len), ("outer", self.outer_len)] {
            if len < MIN_RING_LEN {
                return Err(RbError::Config(format!(
                    "{name} ring length {len} is below the minimum of {MIN_RING_LEN}"
                )));
            }
            if len % 4 != 0 {
                return Err(RbError::Config(format!(
                    "{name} ring length {len} is not a multiple of 4"
                )));
            }
        }
        if !(self.slot_passing_time > 0.0 && self.slot_passing_time.is_finite()) {
            return Err(RbError::Config(format!(
                "slot_passing_time must be a positive duration, got {}",
                self.slot_passing_time
            )));
        }
        if !(self.horizon > 0.0 && self.horizon.is_finite()) {
            return Err(RbError::Config(format!(
                "horizon must be a positive duration, got {}",
                self.horizon
            )));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    /// The layout and timings of the reference scenario: a 16-slot inner and
    /// 24-slot outer circle, 1 s per slot, one simulated day.
    fn default() -> Self {
        Self {
            inner_len: 16,
            outer_len: 24,
            slot_passing_time: 1.0,
            horizon: 24.0 * 3600.0,
            seed: 42,
        }
    }
}
