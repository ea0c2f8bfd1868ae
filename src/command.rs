//! Command records for the regulator control interface.
//!
//! Requests and responses are fixed-size binary records, kept layout
//! compatible with the original driver's interface: a 32-byte
//! NUL-terminated name field followed by little-endian i32 value fields.
//! Two record shapes exist, the 36-byte [`VrArg`] and the 44-byte
//! [`VrSet`] (arg + min + max).
//!
//! Decoding converts the external record into a typed [`Request`] up
//! front: rail names become [`RegulatorId`]s and register addresses are
//! range-checked, so nothing past this boundary works with raw strings.

use std::str;

use crate::error::{VrError, VrResult};
use crate::regulator::RegulatorId;
use crate::types::Voltage;

/// Size of the name field in every record.
pub const NAME_LEN: usize = 32;

/// Size of a [`VrArg`] record on the wire.
pub const ARG_RECORD_LEN: usize = NAME_LEN + 4;

/// Size of a [`VrSet`] record on the wire.
pub const SET_RECORD_LEN: usize = ARG_RECORD_LEN + 8;

/// Command discriminators.
///
/// Code 1 is the constrained set-voltage variant, defined by the original
/// interface but never implemented; it decodes to invalid-argument like
/// any other unknown code.
pub mod codes {
    pub const GET_VOLTAGE: u8 = 0;
    pub const SET_VOLTAGE_DIRECT: u8 = 2;
    pub const READ_REGISTER: u8 = 3;
    pub const WRITE_REGISTER: u8 = 4;
}

/// The 36-byte record: name plus one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VrArg {
    pub name: [u8; NAME_LEN],
    pub value: i32,
}

impl VrArg {
    /// Build a record with the given name and value. Names longer than 31
    /// bytes do not fit with their terminator and are rejected.
    pub fn new(name: &str, value: i32) -> VrResult<Self> {
        if name.len() >= NAME_LEN {
            return Err(VrError::InvalidArgument(format!(
                "name too long: {} bytes",
                name.len()
            )));
        }
        let mut buf = [0u8; NAME_LEN];
        buf[..name.len()].copy_from_slice(name.as_bytes());
        Ok(Self { name: buf, value })
    }

    /// Parse a record from the wire.
    pub fn decode(buf: &[u8]) -> VrResult<Self> {
        if buf.len() != ARG_RECORD_LEN {
            return Err(VrError::InvalidArgument(format!(
                "expected {} byte record, got {}",
                ARG_RECORD_LEN,
                buf.len()
            )));
        }
        let mut name = [0u8; NAME_LEN];
        name.copy_from_slice(&buf[..NAME_LEN]);
        let value = read_i32(buf, NAME_LEN);
        Ok(Self { name, value })
    }

    /// Serialize for the wire.
    pub fn encode(&self) -> [u8; ARG_RECORD_LEN] {
        let mut buf = [0u8; ARG_RECORD_LEN];
        buf[..NAME_LEN].copy_from_slice(&self.name);
        buf[NAME_LEN..].copy_from_slice(&self.value.to_le_bytes());
        buf
    }

    /// The name field as a string: the bytes before the first NUL. Never
    /// reads past the 32-byte bound; an unterminated field uses all of it.
    pub fn name_str(&self) -> VrResult<&str> {
        let end = self.name.iter().position(|&b| b == 0).unwrap_or(NAME_LEN);
        str::from_utf8(&self.name[..end])
            .map_err(|_| VrError::InvalidArgument("name is not valid UTF-8".into()))
    }
}

/// The 44-byte record: [`VrArg`] plus min and max.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VrSet {
    pub info: VrArg,
    pub min: i32,
    pub max: i32,
}

impl VrSet {
    /// Parse a record from the wire.
    pub fn decode(buf: &[u8]) -> VrResult<Self> {
        if buf.len() != SET_RECORD_LEN {
            return Err(VrError::InvalidArgument(format!(
                "expected {} byte record, got {}",
                SET_RECORD_LEN,
                buf.len()
            )));
        }
        let info = VrArg::decode(&buf[..ARG_RECORD_LEN])?;
        let min = read_i32(buf, ARG_RECORD_LEN);
        let max = read_i32(buf, ARG_RECORD_LEN + 4);
        Ok(Self { info, min, max })
    }

    /// Serialize for the wire.
    pub fn encode(&self) -> [u8; SET_RECORD_LEN] {
        let mut buf = [0u8; SET_RECORD_LEN];
        buf[..ARG_RECORD_LEN].copy_from_slice(&self.info.encode());
        buf[ARG_RECORD_LEN..ARG_RECORD_LEN + 4].copy_from_slice(&self.min.to_le_bytes());
        buf[ARG_RECORD_LEN + 4..].copy_from_slice(&self.max.to_le_bytes());
        buf
    }
}

/// A validated command, ready for dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// Read a rail's current voltage.
    GetVoltage { rail: RegulatorId },
    /// Program a rail. The response carries the read-back voltage.
    SetVoltage { rail: RegulatorId, target: Voltage },
    /// Raw register read. Bypasses all voltage validation.
    ReadRegister { addr: u8 },
    /// Raw register write. Bypasses all voltage validation.
    WriteRegister { addr: u8, value: u8 },
}

impl Request {
    /// Decode and validate a wire command.
    ///
    /// Field mapping for the raw register commands: read carries the
    /// register address in `value`; write carries the address in `value`
    /// and the byte in `min`. The name field of register commands is not
    /// interpreted.
    pub fn decode(code: u8, payload: &[u8]) -> VrResult<Request> {
        match code {
            codes::GET_VOLTAGE => {
                let arg = VrArg::decode(payload)?;
                let rail = arg.name_str()?.parse()?;
                Ok(Request::GetVoltage { rail })
            }
            codes::SET_VOLTAGE_DIRECT => {
                let set = VrSet::decode(payload)?;
                let rail = set.info.name_str()?.parse()?;
                Ok(Request::SetVoltage {
                    rail,
                    target: Voltage::from_uv(set.min),
                })
            }
            codes::READ_REGISTER => {
                let arg = VrArg::decode(payload)?;
                Ok(Request::ReadRegister {
                    addr: register_address(arg.value)?,
                })
            }
            codes::WRITE_REGISTER => {
                let set = VrSet::decode(payload)?;
                Ok(Request::WriteRegister {
                    addr: register_address(set.info.value)?,
                    value: register_byte(set.min)?,
                })
            }
            other => Err(VrError::InvalidArgument(format!(
                "unknown command code {}",
                other
            ))),
        }
    }
}

/// A completed command's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// The rail's voltage as read from the hardware.
    Voltage { rail: RegulatorId, voltage: Voltage },
    /// A raw register's content.
    Register { addr: u8, value: u8 },
}

/// Read a little-endian i32 at `offset`. Callers have already checked the
/// record length.
fn read_i32(buf: &[u8], offset: usize) -> i32 {
    i32::from_le_bytes([buf[offset], buf[offset + 1], buf[offset + 2], buf[offset + 3]])
}

fn register_address(value: i32) -> VrResult<u8> {
    u8::try_from(value)
        .map_err(|_| VrError::InvalidArgument(format!("register address {} out of range", value)))
}

fn register_byte(value: i32) -> VrResult<u8> {
    u8::try_from(value)
        .map_err(|_| VrError::InvalidArgument(format!("register value {} out of range", value)))
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn arg_bytes(name: &str, value: i32) -> Vec<u8> {
        VrArg::new(name, value).unwrap().encode().to_vec()
    }

    fn set_bytes(name: &str, value: i32, min: i32, max: i32) -> Vec<u8> {
        let info = VrArg::new(name, value).unwrap();
        VrSet { info, min, max }.encode().to_vec()
    }

    #[test]
    fn arg_round_trips() {
        let arg = VrArg::new("dcdc3", 1_150_000).unwrap();
        let decoded = VrArg::decode(&arg.encode()).unwrap();
        assert_eq!(decoded, arg);
        assert_eq!(decoded.name_str().unwrap(), "dcdc3");
        assert_eq!(decoded.value, 1_150_000);
    }

    #[test]
    fn set_round_trips() {
        let set = VrSet {
            info: VrArg::new("ldo11", 0).unwrap(),
            min: 900_000,
            max: 900_000,
        };
        assert_eq!(VrSet::decode(&set.encode()).unwrap(), set);
    }

    #[test]
    fn oversized_name_is_rejected() {
        assert!(matches!(
            VrArg::new("x".repeat(NAME_LEN).as_str(), 0),
            Err(VrError::InvalidArgument(_))
        ));
    }

    #[test]
    fn unterminated_name_stays_in_bounds() {
        let mut arg = VrArg::new("a", 0).unwrap();
        arg.name = [b'a'; NAME_LEN];
        assert_eq!(arg.name_str().unwrap().len(), NAME_LEN);
    }

    #[test]
    fn non_utf8_name_is_invalid() {
        let mut arg = VrArg::new("a", 0).unwrap();
        arg.name[0] = 0xFF;
        assert!(matches!(
            arg.name_str(),
            Err(VrError::InvalidArgument(_))
        ));
    }

    #[test]
    fn decodes_get_voltage() {
        let req = Request::decode(codes::GET_VOLTAGE, &arg_bytes("dcdc2", 0)).unwrap();
        assert_eq!(
            req,
            Request::GetVoltage {
                rail: RegulatorId::Dcdc(2)
            }
        );
    }

    #[test]
    fn decodes_set_voltage_target_from_min_field() {
        let req =
            Request::decode(codes::SET_VOLTAGE_DIRECT, &set_bytes("ldo7", 0, 1_800_000, 0)).unwrap();
        assert_eq!(
            req,
            Request::SetVoltage {
                rail: RegulatorId::Ldo(7),
                target: Voltage::from_uv(1_800_000)
            }
        );
    }

    #[test]
    fn decodes_register_commands() {
        let req = Request::decode(codes::READ_REGISTER, &arg_bytes("", 0x48)).unwrap();
        assert_eq!(req, Request::ReadRegister { addr: 0x48 });

        let req = Request::decode(codes::WRITE_REGISTER, &set_bytes("", 0x4E, 0xAA, 0)).unwrap();
        assert_eq!(
            req,
            Request::WriteRegister {
                addr: 0x4E,
                value: 0xAA
            }
        );
    }

    #[test_case(256; "one past the register map")]
    #[test_case(-1; "negative")]
    fn rejects_out_of_range_register_address(addr: i32) {
        assert!(matches!(
            Request::decode(codes::READ_REGISTER, &arg_bytes("", addr)),
            Err(VrError::InvalidArgument(_))
        ));
    }

    #[test]
    fn unresolvable_name_is_not_found() {
        assert!(matches!(
            Request::decode(codes::GET_VOLTAGE, &arg_bytes("dcdc7", 0)),
            Err(VrError::NotFound(_))
        ));
    }

    #[test_case(1; "constrained set variant is not implemented")]
    #[test_case(5)]
    #[test_case(0xFF)]
    fn unknown_code_is_invalid_argument(code: u8) {
        assert!(matches!(
            Request::decode(code, &arg_bytes("dcdc1", 0)),
            Err(VrError::InvalidArgument(_))
        ));
    }

    #[test]
    fn short_payload_is_invalid_argument() {
        assert!(matches!(
            Request::decode(codes::GET_VOLTAGE, &[0u8; 10]),
            Err(VrError::InvalidArgument(_))
        ));
    }
}
