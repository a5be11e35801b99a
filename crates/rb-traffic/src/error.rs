use rb_core::Exit;
use thiserror::Error;

/// Fatal path-planning errors, surfaced when a source or car is constructed.
#[derive(Debug, Error)]
pub enum PathError {
    /// Ingress and egress are the same exit — the model has no U-turns, so
    /// the derived hop-count of 0 cannot be routed.
    #[error("U-turn at exit {0} is not a valid route")]
    UTurn(Exit),
}
