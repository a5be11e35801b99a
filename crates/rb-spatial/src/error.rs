use rb_core::config::MIN_RING_LEN;
use thiserror::Error;

/// Fatal layout errors, surfaced at ring construction.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("ring length {0} is below the minimum of {MIN_RING_LEN}")]
    RingTooShort(usize),

    /// Four compass exits need four equal quarter-arcs.
    #[error("ring length {0} is not a multiple of 4")]
    RingNotQuarterable(usize),
}
