//! Core value types shared across the crate.

mod voltage;

pub use voltage::Voltage;
