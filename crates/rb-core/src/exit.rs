//! Compass exits and hop-count arithmetic.
//!
//! The four access points are numbered counting from the West:
//! West = 0, South = 1, East = 2, North = 3.  The hop-count between two
//! exits — the number of quarter-turns a car makes between joining and
//! leaving — is `(egress − ingress) mod 4` and decides the routing: 1 or 2
//! hops take the short way round on the outer ring, 3 hops cut through the
//! inner ring.  A hop-count of 0 would be a U-turn, which the model forbids.

use std::fmt;

/// One of the four compass access points of the roundabout.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Exit {
    West = 0,
    South = 1,
    East = 2,
    North = 3,
}

impl Exit {
    /// All four exits in index order.
    pub const ALL: [Exit; 4] = [Exit::West, Exit::South, Exit::East, Exit::North];

    /// 0-based index of this exit (West = 0).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look an exit up by its 0-based index.
    pub fn from_index(i: usize) -> Option<Exit> {
        Exit::ALL.get(i).copied()
    }

    /// Quarter-turns from `self` (ingress) to `egress`, in `0..4`.
    ///
    /// 0 means a U-turn and is rejected wherever a path is planned.
    #[inline]
    pub fn hops_to(self, egress: Exit) -> u8 {
        ((egress.index() + 4 - self.index()) % 4) as u8
    }

    /// The exit `hops` quarter-turns downstream of `self`.
    #[inline]
    pub fn offset(self, hops: u8) -> Exit {
        Exit::ALL[(self.index() + hops as usize) % 4]
    }
}

impl fmt::Display for Exit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Exit::West => "West",
            Exit::South => "South",
            Exit::East => "East",
            Exit::North => "North",
        };
        write!(f, "{name}")
    }
}
