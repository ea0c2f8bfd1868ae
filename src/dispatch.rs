//! Command dispatcher for the regulator interface.
//!
//! Owns the [`Spm8821`] driver (and through it the bus handle) for the
//! process lifetime: bound once at startup, released at shutdown. Every
//! command is a single-shot, fully synchronous transaction; the driver sits
//! behind one mutex held for the whole resolve→write→settle→read sequence,
//! so a voltage write and its confirming read cannot interleave with
//! another caller's transaction.
//!
//! A transport failure during a write leaves the hardware state unknown;
//! the error is passed through verbatim and nothing is rolled back.

use parking_lot::Mutex;
use tracing::debug;

use crate::command::{codes, Request, Response, VrArg, VrSet};
use crate::error::{VrError, VrResult};
use crate::hw_trait::{HwError, I2c};
use crate::pmic::Spm8821;
use crate::regulator::RegulatorId;
use crate::types::Voltage;

/// Routes validated commands to the PMIC driver.
pub struct Dispatcher<I2C> {
    pmic: Mutex<Option<Spm8821<I2C>>>,
}

impl<I2C: I2c> Dispatcher<I2C> {
    /// Create a dispatcher bound to an opened driver.
    pub fn new(pmic: Spm8821<I2C>) -> Self {
        Self {
            pmic: Mutex::new(Some(pmic)),
        }
    }

    /// Create a dispatcher with no transport. Every command fails with
    /// [`VrError::NotReady`] until [`Dispatcher::bind`] is called.
    pub fn unbound() -> Self {
        Self {
            pmic: Mutex::new(None),
        }
    }

    /// Bind a driver, replacing any previous one.
    pub fn bind(&self, pmic: Spm8821<I2C>) {
        *self.pmic.lock() = Some(pmic);
    }

    /// Release the driver, if bound. Subsequent commands fail NotReady.
    pub fn release(&self) -> Option<Spm8821<I2C>> {
        self.pmic.lock().take()
    }

    /// Execute a typed command.
    pub fn execute(&self, request: Request) -> VrResult<Response> {
        debug!("dispatch {:?}", request);
        match request {
            Request::GetVoltage { rail } => Ok(Response::Voltage {
                rail,
                voltage: self.get_voltage(rail)?,
            }),
            Request::SetVoltage { rail, target } => Ok(Response::Voltage {
                rail,
                voltage: self.set_voltage(rail, target)?,
            }),
            Request::ReadRegister { addr } => Ok(Response::Register {
                addr,
                value: self.read_register(addr)?,
            }),
            Request::WriteRegister { addr, value } => {
                self.write_register(addr, value)?;
                Ok(Response::Register { addr, value })
            }
        }
    }

    /// Execute a wire command, echoing the request record back with its
    /// value field replaced by the result.
    pub fn execute_frame(&self, code: u8, payload: &[u8]) -> VrResult<Vec<u8>> {
        match code {
            codes::GET_VOLTAGE => {
                let mut arg = VrArg::decode(payload)?;
                let rail: RegulatorId = arg.name_str()?.parse()?;
                arg.value = self.get_voltage(rail)?.uv();
                Ok(arg.encode().to_vec())
            }
            codes::SET_VOLTAGE_DIRECT => {
                let mut set = VrSet::decode(payload)?;
                let rail: RegulatorId = set.info.name_str()?.parse()?;
                let achieved = self.set_voltage(rail, Voltage::from_uv(set.min))?;
                set.info.value = achieved.uv();
                Ok(set.encode().to_vec())
            }
            codes::READ_REGISTER | codes::WRITE_REGISTER => {
                // Re-use the typed decode for address validation, then echo.
                match Request::decode(code, payload)? {
                    Request::ReadRegister { addr } => {
                        let mut arg = VrArg::decode(payload)?;
                        arg.value = self.read_register(addr)? as i32;
                        Ok(arg.encode().to_vec())
                    }
                    Request::WriteRegister { addr, value } => {
                        self.write_register(addr, value)?;
                        let mut set = VrSet::decode(payload)?;
                        set.info.value = value as i32;
                        Ok(set.encode().to_vec())
                    }
                    _ => Err(VrError::InvalidArgument("malformed register command".into())),
                }
            }
            other => Err(VrError::InvalidArgument(format!(
                "unknown command code {}",
                other
            ))),
        }
    }

    /// Read a rail's current voltage.
    pub fn get_voltage(&self, rail: RegulatorId) -> VrResult<Voltage> {
        let desc = rail.descriptor();
        self.with_pmic(|pmic| pmic.read_voltage(&desc))
    }

    /// Program a rail and return the read-back voltage.
    pub fn set_voltage(&self, rail: RegulatorId, target: Voltage) -> VrResult<Voltage> {
        let desc = rail.descriptor();
        self.with_pmic(|pmic| pmic.write_voltage(&desc, target))
    }

    /// Raw register read; no name resolution, no decoding.
    pub fn read_register(&self, addr: u8) -> VrResult<u8> {
        self.with_pmic(|pmic| pmic.read_register(addr))
    }

    /// Raw register write; no encoding.
    pub fn write_register(&self, addr: u8, value: u8) -> VrResult<()> {
        self.with_pmic(|pmic| pmic.write_register(addr, value))
    }

    /// Run `op` with the driver, holding the lock for the whole
    /// transaction. Fails NotReady if no driver is bound.
    fn with_pmic<T>(
        &self,
        op: impl FnOnce(&mut Spm8821<I2C>) -> Result<T, HwError>,
    ) -> VrResult<T> {
        let mut guard = self.pmic.lock();
        let pmic = guard.as_mut().ok_or(VrError::NotReady)?;
        op(pmic).map_err(VrError::from)
    }
}
