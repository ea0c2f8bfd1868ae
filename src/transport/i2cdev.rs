//! I2C transport over the Linux `/dev/i2c-N` character device.
//!
//! Addresses a slave with the `I2C_SLAVE` ioctl, then uses plain
//! `read(2)`/`write(2)` for transfers. `write_read` is two bus
//! transactions with a stop between them rather than a repeated start;
//! the SPM8821's register interface tolerates that.

use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::os::fd::AsRawFd;

use tracing::debug;

use crate::hw_trait::i2c::{I2c, I2cError};
use crate::hw_trait::{HwError, Result};

nix::ioctl_write_int_bad!(ioctl_i2c_slave, 0x0703); // I2C_SLAVE

/// An open `/dev/i2c-N` bus.
pub struct I2cDev {
    file: File,
    path: String,
    // Last slave address programmed, to skip redundant ioctls.
    slave: Option<u8>,
}

impl I2cDev {
    /// Open I2C bus `bus` (`/dev/i2c-<bus>`).
    pub fn open(bus: u32) -> Result<Self> {
        let path = format!("/dev/i2c-{}", bus);
        let file = OpenOptions::new().read(true).write(true).open(&path)?;
        debug!("opened {}", path);
        Ok(Self {
            file,
            path,
            slave: None,
        })
    }

    fn set_slave(&mut self, addr: u8) -> Result<()> {
        if self.slave == Some(addr) {
            return Ok(());
        }
        unsafe { ioctl_i2c_slave(self.file.as_raw_fd(), addr as i32) }.map_err(|e| {
            HwError::I2c(I2cError::Other(format!(
                "I2C_SLAVE 0x{:02X} on {}: {}",
                addr, self.path, e
            )))
        })?;
        self.slave = Some(addr);
        Ok(())
    }
}

impl I2c for I2cDev {
    fn write(&mut self, addr: u8, data: &[u8]) -> Result<()> {
        self.set_slave(addr)?;
        let n = self.file.write(data)?;
        if n != data.len() {
            return Err(HwError::I2c(I2cError::ShortTransfer {
                expected: data.len(),
                got: n,
            }));
        }
        Ok(())
    }

    fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<()> {
        self.set_slave(addr)?;
        let n = self.file.read(buffer)?;
        if n != buffer.len() {
            return Err(HwError::I2c(I2cError::ShortTransfer {
                expected: buffer.len(),
                got: n,
            }));
        }
        Ok(())
    }

    fn write_read(&mut self, addr: u8, write: &[u8], read: &mut [u8]) -> Result<()> {
        self.write(addr, write)?;
        self.read(addr, read)
    }
}
