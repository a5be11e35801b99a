//! Fixed-length circular sequence with modular indexing.
//!
//! Indices are `i64` so that exit-boundary arithmetic like
//! `exit * quarter - 1` can go below zero without callers doing their own
//! wrapping; everything is reduced with `rem_euclid`, which is always
//! non-negative.

use rb_core::config::MIN_RING_LEN;

use crate::error::LayoutError;

/// An immutable-length ordered sequence of `N` elements, indexed modulo `N`.
///
/// `N` is validated once at construction (≥ 16, multiple of 4) and never
/// changes.
pub struct Ring<T> {
    data: Vec<T>,
}

impl<T> Ring<T> {
    pub fn new(data: Vec<T>) -> Result<Ring<T>, LayoutError> {
        let n = data.len();
        if n < MIN_RING_LEN {
            return Err(LayoutError::RingTooShort(n));
        }
        if n % 4 != 0 {
            return Err(LayoutError::RingNotQuarterable(n));
        }
        Ok(Ring { data })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false` — a ring cannot be constructed with fewer than 16
    /// elements.  Present to satisfy the usual `len`/`is_empty` pairing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Element at `i mod N`.  Negative indices wrap backwards.
    #[inline]
    pub fn get(&self, i: i64) -> &T {
        let n = self.data.len() as i64;
        &self.data[i.rem_euclid(n) as usize]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }
}

/// The elements from `start mod N` up to, but not including, `stop mod N`.
///
/// When the reduced `start` exceeds the reduced `stop`, the range wraps
/// around the ring boundary: the result is the backing sequence's tail
/// concatenated with its head, never an empty slice.  Equal reduced bounds
/// give an empty range.
pub fn slice_wrap<'a, T>(ring: &'a Ring<T>, start: i64, stop: i64) -> Vec<&'a T> {
    let n = ring.data.len() as i64;
    let start = start.rem_euclid(n) as usize;
    let stop = stop.rem_euclid(n) as usize;
    if start <= stop {
        ring.data[start..stop].iter().collect()
    } else {
        ring.data[start..].iter().chain(&ring.data[..stop]).collect()
    }
}
