//! Userspace voltage regulator control for the SPM8821 PMIC.
//!
//! The SPM8821 is the power-management IC on SpacemiT K1 boards (Banana Pi
//! F3, Orange Pi RV2 and friends). It exposes six buck converters
//! (`dcdc1`-`dcdc6`) and eleven LDOs (`ldo1`-`ldo11`), each with a single
//! 8-bit voltage-select register reachable over I2C.
//!
//! This crate translates rail names and microvolt targets into register
//! transactions: [`regulator`] resolves a rail name to its register address
//! and encoding family, [`codec`] converts microvolts to and from the chip's
//! two register encodings, [`pmic`] runs the actual bus transactions, and
//! [`dispatch`] ties it together behind a small command interface. The
//! `vrctl` binary is a thin CLI over that interface.
//!
//! Writing a wrong value into a voltage-select register can damage the SoC,
//! so the conversion layer reproduces the datasheet tables exactly and the
//! dispatcher refuses anything it cannot resolve before touching the bus.

pub mod codec;
pub mod command;
pub mod dispatch;
pub mod error;
pub mod hw_trait;
pub mod pmic;
pub mod regulator;
pub mod tracing;
pub mod transport;
pub mod types;
