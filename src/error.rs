//! Error types for the regulator command interface.

use thiserror::Error;

use crate::hw_trait::HwError;

/// Command interface errors.
///
/// All resolution and validation failures are raised before any bus access
/// happens; a [`VrError::Transport`] is the only kind that can leave the
/// hardware in a changed state.
#[derive(Error, Debug)]
pub enum VrError {
    /// Name does not resolve to any known regulator
    #[error("no such regulator: {0}")]
    NotFound(String),

    /// Unrecognized command or malformed payload
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No transport is bound; the device was never opened or was released
    #[error("transport not ready")]
    NotReady,

    /// Underlying bus transaction failed, passed through verbatim
    #[error(transparent)]
    Transport(#[from] HwError),
}

/// Convenient Result type for command operations.
pub type VrResult<T> = Result<T, VrError>;
