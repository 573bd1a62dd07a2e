//! Plain-text receipt rendering.

use serde::{Deserialize, Serialize};

use kedai_catalog::ProductCatalog;
use kedai_core::{DomainResult, Money};

use crate::cart::Cart;

/// How receipts are labelled and laid out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiptConfig {
    /// Currency label printed before every amount (e.g. "Rp").
    pub currency: String,
    /// Line printed between the items and the total.
    pub separator: String,
}

impl Default for ReceiptConfig {
    fn default() -> Self {
        Self {
            currency: "Rp".to_string(),
            separator: "-".repeat(30),
        }
    }
}

/// Render the cart as a receipt, one line per cart line in cart order:
///
/// ```text
/// Kopi Hitam x2 = Rp 30,000
/// Latte x1 = Rp 25,000
/// ------------------------------
/// TOTAL = Rp 55,000
/// ```
///
/// Prices are the catalog's current ones. Output is deterministic for a given
/// cart and catalog.
pub fn receipt_text(
    cart: &Cart,
    catalog: &ProductCatalog,
    config: &ReceiptConfig,
) -> DomainResult<String> {
    let lines = cart.priced_lines(catalog)?;
    let total = lines
        .iter()
        .try_fold(Money::ZERO, |acc, line| acc.checked_add(line.subtotal))?;

    let mut out = String::new();
    for line in &lines {
        out.push_str(&format!(
            "{} x{} = {}\n",
            line.name,
            line.quantity,
            line.subtotal.format_with(&config.currency)
        ));
    }
    out.push_str(&config.separator);
    out.push('\n');
    out.push_str(&format!("TOTAL = {}", total.format_with(&config.currency)));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cart_prints_zero_total() {
        let catalog = ProductCatalog::seeded_default();
        let text = receipt_text(&Cart::new(), &catalog, &ReceiptConfig::default()).unwrap();
        assert_eq!(text, format!("{}\nTOTAL = Rp 0", "-".repeat(30)));
    }

    #[test]
    fn lists_lines_in_cart_order() {
        let catalog = ProductCatalog::seeded_default();
        let mut cart = Cart::new();
        cart.add_item(catalog.get_by_key("Latte").unwrap(), 1).unwrap();
        cart.add_item(catalog.get_by_key("Kopi Hitam").unwrap(), 2).unwrap();

        let config = ReceiptConfig {
            currency: "IDR".to_string(),
            separator: "====".to_string(),
        };
        let text = receipt_text(&cart, &catalog, &config).unwrap();
        assert_eq!(
            text,
            "Latte x1 = IDR 25,000\nKopi Hitam x2 = IDR 30,000\n====\nTOTAL = IDR 55,000"
        );
    }

    #[test]
    fn config_fields_default_when_missing() {
        let config: ReceiptConfig = serde_json::from_str(r#"{"currency":"USD"}"#).unwrap();
        assert_eq!(config.currency, "USD");
        assert_eq!(config.separator, ReceiptConfig::default().separator);
    }
}
