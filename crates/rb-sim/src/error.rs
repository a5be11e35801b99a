//! Simulation-level error type.
//!
//! `SimError` is the union of everything that can go wrong while building
//! or running a simulation: a bad configuration, an impossible ring layout,
//! a reflexive direction pair, or a kernel protocol violation during the
//! run itself.

use thiserror::Error;

use rb_core::RbError;
use rb_kernel::KernelError;
use rb_spatial::LayoutError;
use rb_traffic::PathError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] RbError),

    #[error("kernel error: {0}")]
    Kernel(#[from] KernelError),

    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("path error: {0}")]
    Path(#[from] PathError),
}

pub type SimResult<T> = Result<T, SimError>;
