//! SPM8821 PMIC driver.
//!
//! Register-level access to the PMIC's voltage-select registers over an
//! [`I2c`] bus. Voltage writes always read the register back after a short
//! settle delay; the value reported to the caller is what the chip actually
//! holds, not an echo of the request, so codec quantization is visible.
//!
//! A write that fails partway leaves the hardware state unknown. There is
//! no rollback; the error is propagated and the caller decides what to do.

use std::thread;
use std::time::Duration;

use tracing::{debug, trace};

use crate::codec;
use crate::hw_trait::{I2c, Result};
use crate::regulator::RegulatorDescriptor;
use crate::types::Voltage;

/// SPM8821 I2C device address.
pub const SPM8821_I2C_ADDR: u8 = 0x41;

/// I2C bus the PMIC sits on (SpacemiT K1 boards).
pub const SPM8821_I2C_BUS: u32 = 8;

/// Wait after a voltage write before the confirming read, so the rail's
/// output has stabilized. The vendor driver sleeps 100-200 us here.
const SETTLE_DELAY: Duration = Duration::from_micros(150);

/// SPM8821 driver owning the bus handle.
pub struct Spm8821<I2C> {
    i2c: I2C,
    addr: u8,
}

impl<I2C: I2c> Spm8821<I2C> {
    /// Create a driver on the given bus, without touching the hardware.
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            addr: SPM8821_I2C_ADDR,
        }
    }

    /// Open the device: create the driver and verify the chip answers.
    ///
    /// The probe reads the `dcdc1` voltage-select register. There is no
    /// retry; an absent or unresponsive chip is a hard failure.
    pub fn probe(i2c: I2C) -> Result<Self> {
        let mut pmic = Self::new(i2c);
        let reg = pmic.read_register(crate::regulator::RegulatorId::Dcdc(1).address())?;
        debug!("SPM8821 present at 0x{:02X}, dcdc1 vsel 0x{:02X}", pmic.addr, reg);
        Ok(pmic)
    }

    /// Release the driver, handing the bus handle back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Read one register.
    pub fn read_register(&mut self, reg: u8) -> Result<u8> {
        let mut data = [0u8; 1];
        self.i2c.write_read(self.addr, &[reg], &mut data)?;
        trace!("read reg 0x{:02X} -> 0x{:02X}", reg, data[0]);
        Ok(data[0])
    }

    /// Write one register. No settle wait, no read-back; this is the raw
    /// passthrough path and bypasses all voltage validation.
    pub fn write_register(&mut self, reg: u8, value: u8) -> Result<()> {
        trace!("write reg 0x{:02X} <- 0x{:02X}", reg, value);
        self.i2c.write(self.addr, &[reg, value])
    }

    /// Read a rail's current voltage.
    pub fn read_voltage(&mut self, desc: &RegulatorDescriptor) -> Result<Voltage> {
        let reg = self.read_register(desc.address)?;
        Ok(codec::decode(reg, desc.family))
    }

    /// Program a rail and return the voltage it actually settled at.
    ///
    /// The target is quantized by the register encoding, so the returned
    /// voltage may differ from the request.
    pub fn write_voltage(&mut self, desc: &RegulatorDescriptor, target: Voltage) -> Result<Voltage> {
        let encoded = codec::encode(target, desc.family);
        self.write_register(desc.address, encoded)?;

        thread::sleep(SETTLE_DELAY);

        let actual = self.read_voltage(desc)?;
        debug!(
            "{}: requested {}, programmed 0x{:02X}, read back {}",
            desc.id, target, encoded, actual
        );
        Ok(actual)
    }
}
