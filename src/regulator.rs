//! SPM8821 regulator identities and register layout.
//!
//! Rail names follow the kernel's regulator naming on these boards:
//! `dcdc1`-`dcdc6` for the buck converters and `ldo1`-`ldo11` for the LDOs,
//! where `ldo1`-`ldo4` are the chip's ALDO bank and `ldo5`-`ldo11` its DLDO
//! bank. Names are validated once, at the boundary, into a [`RegulatorId`];
//! everything past that point works with the typed id.
//!
//! Each rail owns three consecutive registers; the voltage-select register
//! is the first, hence the stride of 3 in the address arithmetic below.

use std::fmt;
use std::str::FromStr;

use crate::error::VrError;

/// First buck voltage-select register (BUCK1, i.e. `dcdc1`).
const BUCK_VOLT_BASE: u8 = 0x48;
/// First ALDO voltage-select register (`ldo1`).
const ALDO_VOLT_BASE: u8 = 0x5C;
/// First DLDO voltage-select register (`ldo5`).
const DLDO_VOLT_BASE: u8 = 0x68;
/// Registers reserved per rail.
const REG_VOLT_STRIDE: u8 = 3;

/// Which voltage encoding a rail uses. See [`crate::codec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegulatorFamily {
    /// Switching buck converter, two-region 5/25 mV encoding.
    Buck,
    /// Linear regulator (ALDO or DLDO), uniform 25 mV encoding.
    Linear,
}

/// A validated regulator identifier.
///
/// Index ranges are enforced at construction: `Dcdc` carries 1-6 and `Ldo`
/// carries 1-11, matching the rail names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegulatorId {
    Dcdc(u8),
    Ldo(u8),
}

impl RegulatorId {
    /// Iterate over every rail on the chip, in display order.
    pub fn all() -> impl Iterator<Item = RegulatorId> {
        (1..=6)
            .map(RegulatorId::Dcdc)
            .chain((1..=11).map(RegulatorId::Ldo))
    }

    /// The encoding family for this rail.
    pub fn family(&self) -> RegulatorFamily {
        match self {
            RegulatorId::Dcdc(_) => RegulatorFamily::Buck,
            RegulatorId::Ldo(_) => RegulatorFamily::Linear,
        }
    }

    /// The rail's voltage-select register address.
    pub fn address(&self) -> u8 {
        match *self {
            RegulatorId::Dcdc(n) => BUCK_VOLT_BASE + (n - 1) * REG_VOLT_STRIDE,
            // ldo1-4 live in the ALDO bank, ldo5-11 in the DLDO bank.
            RegulatorId::Ldo(n) if n <= 4 => ALDO_VOLT_BASE + (n - 1) * REG_VOLT_STRIDE,
            RegulatorId::Ldo(n) => DLDO_VOLT_BASE + (n - 5) * REG_VOLT_STRIDE,
        }
    }

    /// Full descriptor for this rail.
    pub fn descriptor(&self) -> RegulatorDescriptor {
        RegulatorDescriptor {
            id: *self,
            address: self.address(),
            family: self.family(),
        }
    }
}

impl fmt::Display for RegulatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegulatorId::Dcdc(n) => write!(f, "dcdc{}", n),
            RegulatorId::Ldo(n) => write!(f, "ldo{}", n),
        }
    }
}

impl FromStr for RegulatorId {
    type Err = VrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let not_found = || VrError::NotFound(s.to_string());

        if let Some(rest) = s.strip_prefix("dcdc") {
            let bytes = rest.as_bytes();
            // Exactly one digit, 1-6.
            if bytes.len() == 1 && (b'1'..=b'6').contains(&bytes[0]) {
                return Ok(RegulatorId::Dcdc(bytes[0] - b'0'));
            }
            return Err(not_found());
        }

        if let Some(rest) = s.strip_prefix("ldo") {
            let bytes = rest.as_bytes();
            let n = match bytes {
                [d] if d.is_ascii_digit() => d - b'0',
                // Two-digit rails are ldo10 and ldo11 only; the range
                // check below rejects everything else.
                [d1, d2] if d1.is_ascii_digit() && d2.is_ascii_digit() => {
                    (d1 - b'0') * 10 + (d2 - b'0')
                }
                _ => return Err(not_found()),
            };
            if (1..=11).contains(&n) {
                return Ok(RegulatorId::Ldo(n));
            }
            return Err(not_found());
        }

        Err(not_found())
    }
}

/// Everything needed to run a register transaction for one rail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegulatorDescriptor {
    pub id: RegulatorId,
    pub address: u8,
    pub family: RegulatorFamily,
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("dcdc1", RegulatorId::Dcdc(1), 0x48, RegulatorFamily::Buck)]
    #[test_case("dcdc3", RegulatorId::Dcdc(3), 0x4E, RegulatorFamily::Buck; "buck stride of three")]
    #[test_case("dcdc6", RegulatorId::Dcdc(6), 0x57, RegulatorFamily::Buck)]
    #[test_case("ldo1", RegulatorId::Ldo(1), 0x5C, RegulatorFamily::Linear; "first aldo")]
    #[test_case("ldo4", RegulatorId::Ldo(4), 0x65, RegulatorFamily::Linear; "last aldo")]
    #[test_case("ldo5", RegulatorId::Ldo(5), 0x68, RegulatorFamily::Linear; "first dldo")]
    #[test_case("ldo10", RegulatorId::Ldo(10), 0x77, RegulatorFamily::Linear)]
    #[test_case("ldo11", RegulatorId::Ldo(11), 0x7A, RegulatorFamily::Linear; "last dldo")]
    fn resolves(name: &str, id: RegulatorId, addr: u8, family: RegulatorFamily) {
        let desc = name.parse::<RegulatorId>().unwrap().descriptor();
        assert_eq!(desc.id, id);
        assert_eq!(desc.address, addr);
        assert_eq!(desc.family, family);
    }

    #[test_case("dcdc0")]
    #[test_case("dcdc7")]
    #[test_case("dcdc12")]
    #[test_case("dcdc")]
    #[test_case("ldo0")]
    #[test_case("ldo12")]
    #[test_case("ldo111")]
    #[test_case("ldo")]
    #[test_case("foo1")]
    #[test_case("")]
    fn rejects(name: &str) {
        assert!(matches!(
            name.parse::<RegulatorId>(),
            Err(VrError::NotFound(_))
        ));
    }

    #[test]
    fn name_round_trips() {
        for id in RegulatorId::all() {
            assert_eq!(id.to_string().parse::<RegulatorId>().unwrap(), id);
        }
    }

    #[test]
    fn seventeen_rails() {
        assert_eq!(RegulatorId::all().count(), 17);
    }

    #[test]
    fn addresses_are_unique() {
        let mut addrs: Vec<u8> = RegulatorId::all().map(|id| id.address()).collect();
        addrs.sort_unstable();
        addrs.dedup();
        assert_eq!(addrs.len(), 17);
    }
}
