//! Framework error type.
//!
//! Sub-crates define their own error enums (kernel protocol violations, ring
//! layout errors, path-planning errors) and either convert into `RbError`
//! via `From` impls or stay separate and get wrapped by `rb-sim`'s error.
//! Configuration errors live here because `SimConfig` does.

use thiserror::Error;

/// The top-level error type for `rb-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum RbError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `rb-*` crates.
pub type RbResult<T> = Result<T, RbError>;
