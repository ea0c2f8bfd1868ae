//! I2C bus abstraction.

use thiserror::Error;

use super::Result;

/// I2C-specific errors.
#[derive(Error, Debug)]
pub enum I2cError {
    /// Device did not acknowledge
    #[error("no acknowledge from device 0x{0:02X}")]
    Nack(u8),

    /// Transfer returned the wrong number of bytes
    #[error("short transfer: expected {expected} bytes, got {got}")]
    ShortTransfer { expected: usize, got: usize },

    /// Anything else the bus implementation reports
    #[error("{0}")]
    Other(String),
}

/// Synchronous I2C master.
///
/// Every method is a single blocking transaction against the bus. The
/// SPM8821 command path is deliberately synchronous: resolve, transact and
/// decode all happen on the calling thread, and the post-write settle wait
/// is a blocking sleep.
pub trait I2c {
    /// Write `data` to the device at 7-bit address `addr`.
    fn write(&mut self, addr: u8, data: &[u8]) -> Result<()>;

    /// Read `buffer.len()` bytes from the device at `addr`.
    fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<()>;

    /// Write `write` then read `read.len()` bytes from the device at
    /// `addr`. Commonly used to select a register and read it back.
    fn write_read(&mut self, addr: u8, write: &[u8], read: &mut [u8]) -> Result<()>;
}
