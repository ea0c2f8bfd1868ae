//! Scripted I2C bus for driver and dispatcher tests.

use super::i2c::{I2c, I2cError};
use super::{HwError, Result};

/// A flat 256-register file plus a write log.
///
/// Models the register-addressed transaction shapes the SPM8821 driver
/// uses: `write([reg, value])` and `write_read([reg]) -> value`. Set
/// `fail` to make every transaction NACK.
pub struct MockBus {
    pub regs: [u8; 256],
    pub writes: Vec<(u8, u8)>,
    pub fail: bool,
    pub last_addr: Option<u8>,
}

impl MockBus {
    pub fn new() -> Self {
        Self {
            regs: [0u8; 256],
            writes: Vec::new(),
            fail: false,
            last_addr: None,
        }
    }
}

impl Default for MockBus {
    fn default() -> Self {
        Self::new()
    }
}

impl I2c for MockBus {
    fn write(&mut self, addr: u8, data: &[u8]) -> Result<()> {
        self.last_addr = Some(addr);
        if self.fail {
            return Err(HwError::I2c(I2cError::Nack(addr)));
        }
        let [reg, value] = data else {
            panic!("unexpected write shape: {:?}", data);
        };
        self.regs[*reg as usize] = *value;
        self.writes.push((*reg, *value));
        Ok(())
    }

    fn read(&mut self, _addr: u8, _buffer: &mut [u8]) -> Result<()> {
        unimplemented!("the driver always addresses a register first");
    }

    fn write_read(&mut self, addr: u8, write: &[u8], read: &mut [u8]) -> Result<()> {
        self.last_addr = Some(addr);
        if self.fail {
            return Err(HwError::I2c(I2cError::Nack(addr)));
        }
        assert_eq!(write.len(), 1, "register-addressed read expected");
        assert_eq!(read.len(), 1, "single-byte read expected");
        read[0] = self.regs[write[0] as usize];
        Ok(())
    }
}
