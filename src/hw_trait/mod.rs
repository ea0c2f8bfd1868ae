//! Hardware abstraction traits.
//!
//! Device drivers in this crate are generic over the interfaces defined
//! here, so they can be exercised against a scripted bus in tests and run
//! against `/dev/i2c-N` (see [`crate::transport`]) in production.

pub mod i2c;
#[cfg(test)]
pub mod mock;

pub use i2c::I2c;

use thiserror::Error;

/// Hardware access errors.
#[derive(Error, Debug)]
pub enum HwError {
    /// I2C bus error
    #[error("I2C error: {0}")]
    I2c(#[from] i2c::I2cError),

    /// OS-level I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenient Result type for hardware operations.
pub type Result<T> = std::result::Result<T, HwError>;
