//! Concrete bus transports implementing the [`crate::hw_trait`] interfaces.

#[cfg(target_os = "linux")]
mod i2cdev;

#[cfg(target_os = "linux")]
pub use i2cdev::I2cDev;
