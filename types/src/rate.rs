//! Fixed-point rates.
//!
//! Rates are expressed per second at [`PRECISION_FACTOR`] scale, the same
//! scale used for growth factors. `rate × seconds` is therefore directly
//! additive to [`ONE`], the scaled representation of exactly 1.0×.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed-point scale shared by rates and growth factors (1e18).
pub const PRECISION_FACTOR: u128 = 1_000_000_000_000_000_000;

/// Exactly 1.0× at [`PRECISION_FACTOR`] scale.
pub const ONE: u128 = PRECISION_FACTOR;

/// Global rate a fresh ledger starts with: 5e10 per second (≈ 0.158% per year).
pub const DEFAULT_GLOBAL_RATE: Rate = Rate(50_000_000_000);

/// A scaled growth rate per second.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Rate(u128);

impl Rate {
    pub const ZERO: Self = Self(0);

    pub const fn new(raw: u128) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Scaled growth accumulated over `secs` seconds: `rate × secs`.
    pub fn checked_accrual(&self, secs: u64) -> Option<u128> {
        self.0.checked_mul(secs as u128)
    }
}

impl From<u128> for Rate {
    fn from(raw: u128) -> Self {
        Self(raw)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/s", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rate_is_5e10() {
        assert_eq!(DEFAULT_GLOBAL_RATE.raw(), 5 * 10u128.pow(10));
        assert_eq!(ONE, 10u128.pow(18));
    }

    #[test]
    fn checked_accrual_multiplies_by_seconds() {
        assert_eq!(DEFAULT_GLOBAL_RATE.checked_accrual(1000), Some(5 * 10u128.pow(13)));
        assert_eq!(Rate::ZERO.checked_accrual(u64::MAX), Some(0));
    }

    #[test]
    fn checked_accrual_overflows_to_none() {
        assert_eq!(Rate::new(u128::MAX).checked_accrual(2), None);
    }
}
