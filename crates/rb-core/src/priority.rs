//! Right-of-way priority classes.
//!
//! Exactly two classes exist.  Vehicles already circulating inside the
//! roundabout have right of way over vehicles trying to join it, so a slot's
//! wait queue serves every pending `Circulating` request before any `Joining`
//! one.  The enum is passed explicitly to every slot request — no bare
//! integer literals at call sites, which is what makes a silent priority
//! inversion impossible to write by accident.

use std::fmt;

/// The two right-of-way classes, ordered most-urgent-first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Priority {
    /// Already inside the roundabout — served first.
    Circulating,
    /// Entering the roundabout — served only when no circulating request
    /// is pending at the same slot.
    Joining,
}

impl Priority {
    /// Numeric rank used for queue ordering.  Lower is more urgent.
    #[inline]
    pub fn rank(self) -> u8 {
        match self {
            Priority::Circulating => 1,
            Priority::Joining => 2,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Circulating => write!(f, "circulating"),
            Priority::Joining => write!(f, "joining"),
        }
    }
}
