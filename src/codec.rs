//! Microvolt to register-value conversion for SPM8821 regulators.
//!
//! The chip uses two encodings for its voltage-select registers:
//!
//! * Buck (`dcdc1`-`dcdc6`): piecewise linear. 500-1350 mV in 5 mV steps
//!   (registers 0-170), then 1375-3450 mV in 25 mV steps (registers
//!   171-254).
//! * LDO (`ldo1`-`ldo11`, both the ALDO and DLDO banks): 500-3400 mV in
//!   25 mV steps over a 7-bit register space, offset so that 0x0B is
//!   500 mV. Register values below 0x0B all mean 500 mV per datasheet.
//!
//! Both directions are total functions clamped to the hardware range.
//! All arithmetic truncates: a request between two steps lands on the step
//! below, never rounds up. Callers get the actually-programmed voltage via
//! the read-back in [`crate::pmic`], so quantization is observable rather
//! than hidden.

use crate::regulator::RegulatorFamily;
use crate::types::Voltage;

/// Register value for an LDO below or at the bottom of its range (500 mV).
const LDO_FLOOR: u8 = 0x0B;

/// Convert a requested voltage to the register value for the given family.
///
/// Out-of-range requests clamp: below range to the floor register, above
/// range to 0xFE for bucks and to the 500 mV floor for LDOs (the datasheet
/// defines no high clamp for LDOs; values the table does not map fall to
/// the default).
pub fn encode(voltage: Voltage, family: RegulatorFamily) -> u8 {
    let mv = voltage.mv();

    match family {
        RegulatorFamily::Buck => {
            if mv < 500 {
                0x00
            } else if mv <= 1350 {
                ((mv - 500) / 5) as u8
            } else if mv <= 3450 {
                (170 + (mv - 1375) / 25) as u8
            } else {
                // Overflow clamp is 0xFE, not 0xFF. Matches the vendor
                // driver; decode treats only 0xFF as the ceiling.
                0xFE
            }
        }
        RegulatorFamily::Linear => {
            if (500..=3400).contains(&mv) {
                let val = (mv - 500) / 25 + LDO_FLOOR as i32;
                if val > 0x7F { 0x7F } else { val as u8 }
            } else {
                LDO_FLOOR
            }
        }
    }
}

/// Convert a register value read from the chip back to a voltage.
pub fn decode(reg: u8, family: RegulatorFamily) -> Voltage {
    match family {
        RegulatorFamily::Buck => {
            if reg <= 170 {
                Voltage::from_mv(500 + reg as i32 * 5)
            } else if reg <= 254 {
                Voltage::from_mv(1375 + (reg as i32 - 170) * 25)
            } else {
                Voltage::from_mv(3450)
            }
        }
        RegulatorFamily::Linear => {
            // Bit 7 is not part of the voltage field.
            let reg = reg & 0x7F;
            if reg < LDO_FLOOR {
                Voltage::from_mv(500)
            } else {
                Voltage::from_mv(500 + (reg as i32 - LDO_FLOOR as i32) * 25)
            }
        }
    }
}
