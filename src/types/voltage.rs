//! Voltage type for regulator rails.
//!
//! Stores voltage internally as microvolts (i32) because that is the unit
//! the command interface and the register codecs work in, with convenience
//! methods for millivolts.
//!
//! # Example
//!
//! ```
//! use spm8821_vr::types::Voltage;
//!
//! let v = Voltage::from_mv(1150);
//! assert_eq!(v.uv(), 1_150_000);
//! assert_eq!(v.mv(), 1150);
//! ```

use std::fmt;

/// Voltage in microvolts.
///
/// A unit-aware voltage type in the style of `std::time::Duration`. Stores
/// microvolts internally; converts on access. Millivolt access truncates,
/// which is also what the register codecs do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Voltage {
    uv: i32,
}

impl Voltage {
    /// Create a voltage from microvolts.
    pub const fn from_uv(uv: i32) -> Self {
        Self { uv }
    }

    /// Create a voltage from millivolts, saturating at the i32 microvolt
    /// range. Anything near the saturation point is already far beyond
    /// what the codecs accept, so a clamped value still encodes to the
    /// hardware ceiling or floor rather than wrapping.
    pub const fn from_mv(mv: i32) -> Self {
        let uv = mv as i64 * 1_000;
        let uv = if uv > i32::MAX as i64 {
            i32::MAX
        } else if uv < i32::MIN as i64 {
            i32::MIN
        } else {
            uv as i32
        };
        Self { uv }
    }

    /// Get the voltage in microvolts.
    pub const fn uv(&self) -> i32 {
        self.uv
    }

    /// Get the voltage in millivolts, truncating.
    pub const fn mv(&self) -> i32 {
        self.uv / 1_000
    }
}

impl fmt::Display for Voltage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} mV", self.mv())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_uv() {
        let v = Voltage::from_uv(1_150_000);
        assert_eq!(v.uv(), 1_150_000);
        assert_eq!(v.mv(), 1150);
    }

    #[test]
    fn from_mv() {
        let v = Voltage::from_mv(3450);
        assert_eq!(v.uv(), 3_450_000);
        assert_eq!(v.mv(), 3450);
    }

    #[test]
    fn mv_truncates() {
        let v = Voltage::from_uv(1_341_999);
        assert_eq!(v.mv(), 1341);
    }

    #[test]
    fn from_mv_saturates_instead_of_wrapping() {
        // 2,200,000 mV does not fit in i32 microvolts.
        let v = Voltage::from_mv(2_200_000);
        assert_eq!(v.uv(), i32::MAX);
        assert!(v > Voltage::from_mv(3450));

        let v = Voltage::from_mv(-2_200_000);
        assert_eq!(v.uv(), i32::MIN);
        assert!(v < Voltage::from_mv(0));
    }

    #[test]
    fn ordering() {
        assert!(Voltage::from_mv(500) < Voltage::from_mv(3450));
    }

    #[test]
    fn display() {
        assert_eq!(Voltage::from_uv(1_150_000).to_string(), "1150 mV");
    }
}
