//! Explicit validation functions.
//!
//! Every constructor and mutating operation in the catalog and cart goes
//! through these, so an invalid value never reaches stored state.

use crate::error::{DomainError, DomainResult};
use crate::money::Money;

/// Trim a product name and reject it if nothing is left.
pub fn validate_name(name: &str) -> DomainResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::invalid_argument("name cannot be empty"));
    }
    Ok(trimmed.to_string())
}

/// Trim a clerk-entered product code and reject it if nothing is left.
pub fn validate_code(code: &str) -> DomainResult<String> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        return Err(DomainError::invalid_argument("product code cannot be empty"));
    }
    Ok(trimmed.to_string())
}

/// Accept a price in whole currency units; negative prices are rejected.
pub fn validate_price(price: i64) -> DomainResult<Money> {
    u64::try_from(price)
        .map(Money::new)
        .map_err(|_| DomainError::invalid_argument(format!("price cannot be negative ({price})")))
}

/// Accept a stock amount; negative amounts are rejected.
pub fn validate_amount(amount: i64) -> DomainResult<i64> {
    if amount < 0 {
        return Err(DomainError::invalid_argument(format!(
            "amount cannot be negative ({amount})"
        )));
    }
    Ok(amount)
}
