//! The `RoundAbout`: two concentric rings of slots plus their exit tables.

use rb_core::SlotId;
use rb_kernel::Slot;

use crate::error::LayoutError;
use crate::exits::ExitIndexTable;
use crate::ring::Ring;

/// Container for all roundabout resources.
///
/// Constructed once at simulation setup and never mutated afterwards; any
/// number of cars may read it without coordination.  Slot IDs are assigned
/// sequentially, outer ring first, so every slot in a run is uniquely
/// identifiable in traces.
pub struct RoundAbout {
    outer: Ring<Slot>,
    inner: Ring<Slot>,
    outer_exits: ExitIndexTable,
    inner_exits: ExitIndexTable,
}

impl RoundAbout {
    pub fn new(inner_len: usize, outer_len: usize) -> Result<RoundAbout, LayoutError> {
        let outer = Ring::new(
            (0..outer_len)
                .map(|i| Slot::new(SlotId(i as u32)))
                .collect(),
        )?;
        let inner = Ring::new(
            (0..inner_len)
                .map(|i| Slot::new(SlotId((outer_len + i) as u32)))
                .collect(),
        )?;
        Ok(RoundAbout {
            outer_exits: ExitIndexTable::new(outer_len),
            inner_exits: ExitIndexTable::new(inner_len),
            outer,
            inner,
        })
    }

    #[inline]
    pub fn outer(&self) -> &Ring<Slot> {
        &self.outer
    }

    #[inline]
    pub fn inner(&self) -> &Ring<Slot> {
        &self.inner
    }

    #[inline]
    pub fn outer_exits(&self) -> &ExitIndexTable {
        &self.outer_exits
    }

    #[inline]
    pub fn inner_exits(&self) -> &ExitIndexTable {
        &self.inner_exits
    }
}
