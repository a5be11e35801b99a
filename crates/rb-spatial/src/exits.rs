//! Exit index tables: where each compass direction touches a ring.
//!
//! A ring of length `N` is split into four quarter-arcs, one per exit,
//! counting from the West.  For each exit the table records two slot
//! indices:
//!
//! - `right = exit * (N/4)` — the first slot of the exit's outbound
//!   quarter-arc, used when a car enters the outer ring directly;
//! - `left = (exit * (N/4) - 1) mod N` — the slot immediately before that
//!   boundary, used for inner-ring entry/exit and as the outer-ring egress
//!   boundary.
//!
//! Computed once from `N`; read-only thereafter.

use rb_core::Exit;

/// The pair of boundary slot indices for one exit on one ring.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ExitBounds {
    /// Slot immediately preceding the outbound quarter-arc (wraps at West).
    pub left: usize,
    /// First slot of the outbound quarter-arc.
    pub right: usize,
}

/// Boundary indices for all four exits of one ring.
pub struct ExitIndexTable {
    bounds: [ExitBounds; 4],
}

impl ExitIndexTable {
    /// Compute the table for a ring of `ring_len` slots.
    ///
    /// `ring_len` is already validated by [`Ring::new`][crate::Ring::new];
    /// the quarter division here is exact.
    pub fn new(ring_len: usize) -> ExitIndexTable {
        let quarter = ring_len / 4;
        let bounds = std::array::from_fn(|exit| {
            let right = exit * quarter;
            ExitBounds {
                left: (right + ring_len - 1) % ring_len,
                right,
            }
        });
        ExitIndexTable { bounds }
    }

    #[inline]
    pub fn bounds(&self, exit: Exit) -> ExitBounds {
        self.bounds[exit.index()]
    }

    /// The slot just before `exit`'s outbound boundary.
    #[inline]
    pub fn left(&self, exit: Exit) -> usize {
        self.bounds[exit.index()].left
    }

    /// The first slot of `exit`'s outbound quarter-arc.
    #[inline]
    pub fn right(&self, exit: Exit) -> usize {
        self.bounds[exit.index()].right
    }
}
