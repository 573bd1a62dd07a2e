//! Money in whole currency units.
//!
//! The point-of-sale works in a zero-decimal currency (Rupiah), so amounts are
//! plain `u64` units and are always rendered without a fractional part.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A non-negative amount of money in whole currency units.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn new(units: u64) -> Self {
        Self(units)
    }

    pub const fn units(self) -> u64 {
        self.0
    }

    /// Checked addition; overflow is reported as an invalid argument.
    pub fn checked_add(self, other: Money) -> DomainResult<Money> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or_else(|| DomainError::invalid_argument("amount overflow"))
    }

    /// Checked multiplication by a quantity (line subtotal).
    pub fn times(self, quantity: u32) -> DomainResult<Money> {
        self.0
            .checked_mul(u64::from(quantity))
            .map(Money)
            .ok_or_else(|| DomainError::invalid_argument("amount overflow"))
    }

    /// Render with a currency label, e.g. `Rp 55,000`.
    pub fn format_with(self, currency: &str) -> String {
        if currency.is_empty() {
            self.to_string()
        } else {
            format!("{currency} {self}")
        }
    }
}

/// Grouped thousands, zero decimal places (`1234567` -> `1,234,567`).
impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let digits = self.0.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }
        f.pad(&out)
    }
}
