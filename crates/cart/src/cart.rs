use serde::{Deserialize, Serialize};

use kedai_catalog::{Product, ProductCatalog};
use kedai_core::{DomainError, DomainResult, Money, ProductId};

/// Cart line: product reference and quantity (always positive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// A cart line resolved against the catalog's current prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricedLine {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub subtotal: Money,
}

/// Ordered line items for one checkout session.
///
/// A product appears at most once; adding it again merges quantities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn quantity_of(&self, product_id: ProductId) -> Option<u32> {
        self.line(product_id).map(|l| l.quantity)
    }

    /// Add `quantity` units of `product`, merging with an existing line.
    /// Returns the line's quantity afterwards.
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> DomainResult<u32> {
        if quantity == 0 {
            return Err(DomainError::invalid_argument("quantity must be positive"));
        }

        let product_id = product.id_typed();
        let new_quantity = match self.lines.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => {
                line.quantity = line
                    .quantity
                    .checked_add(quantity)
                    .ok_or_else(|| DomainError::invalid_argument("quantity overflow"))?;
                line.quantity
            }
            None => {
                self.lines.push(CartLine {
                    product_id,
                    quantity,
                });
                quantity
            }
        };

        tracing::debug!(%product_id, name = product.name(), quantity = new_quantity, "cart item added");
        Ok(new_quantity)
    }

    /// Set a line's quantity exactly. A quantity of zero or less removes the
    /// line (a no-op if there is none); setting a positive quantity on a
    /// product that is not in the cart is `NotFound`.
    pub fn update_item(&mut self, product_id: ProductId, quantity: i64) -> DomainResult<()> {
        if quantity <= 0 {
            self.remove_item(product_id);
            return Ok(());
        }

        let quantity = u32::try_from(quantity)
            .map_err(|_| DomainError::invalid_argument(format!("quantity too large ({quantity})")))?;
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product_id)
            .ok_or_else(|| DomainError::not_found(product_id.to_string()))?;
        line.quantity = quantity;

        tracing::debug!(%product_id, quantity, "cart item updated");
        Ok(())
    }

    /// Remove the line for `product_id`. Returns whether a line was removed.
    pub fn remove_item(&mut self, product_id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        let removed = self.lines.len() != before;
        if removed {
            tracing::debug!(%product_id, "cart item removed");
        }
        removed
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Resolve every line against the catalog.
    ///
    /// Fails with `NotFound` if a line points at a product the catalog no
    /// longer has.
    pub fn priced_lines(&self, catalog: &ProductCatalog) -> DomainResult<Vec<PricedLine>> {
        self.lines
            .iter()
            .map(|line| -> DomainResult<PricedLine> {
                let product = catalog
                    .get_by_id(line.product_id)
                    .ok_or_else(|| DomainError::not_found(line.product_id.to_string()))?;
                Ok(PricedLine {
                    product_id: line.product_id,
                    name: product.name().to_string(),
                    quantity: line.quantity,
                    unit_price: product.price(),
                    subtotal: product.price().times(line.quantity)?,
                })
            })
            .collect()
    }

    /// Sum of `price * quantity` using each product's current price.
    pub fn total(&self, catalog: &ProductCatalog) -> DomainResult<Money> {
        self.priced_lines(catalog)?
            .iter()
            .try_fold(Money::ZERO, |acc, line| acc.checked_add(line.subtotal))
    }

    /// Drop lines whose product is gone from the catalog. Returns how many
    /// lines were dropped.
    pub fn prune_missing(&mut self, catalog: &ProductCatalog) -> usize {
        let before = self.lines.len();
        self.lines.retain(|l| catalog.get_by_id(l.product_id).is_some());
        let pruned = before - self.lines.len();
        if pruned > 0 {
            tracing::warn!(pruned, "dropped cart lines for products no longer in the catalog");
        }
        pruned
    }

    fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kedai_catalog::ProductUpdate;

    fn setup() -> (ProductCatalog, Product, Product) {
        let catalog = ProductCatalog::seeded_default();
        let kopi = catalog.get_by_key("Kopi Hitam").unwrap().clone();
        let latte = catalog.get_by_key("Latte").unwrap().clone();
        (catalog, kopi, latte)
    }

    #[test]
    fn add_item_merges_quantities() {
        let (_, kopi, _) = setup();
        let mut cart = Cart::new();
        assert_eq!(cart.add_item(&kopi, 2).unwrap(), 2);
        assert_eq!(cart.add_item(&kopi, 3).unwrap(), 5);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of(kopi.id_typed()), Some(5));
    }

    #[test]
    fn add_item_rejects_zero_quantity() {
        let (_, kopi, _) = setup();
        let mut cart = Cart::new();
        let err = cart.add_item(&kopi, 0).unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
        assert!(cart.is_empty());
    }

    #[test]
    fn lines_keep_insertion_order() {
        let (_, kopi, latte) = setup();
        let mut cart = Cart::new();
        cart.add_item(&latte, 1).unwrap();
        cart.add_item(&kopi, 1).unwrap();
        cart.add_item(&latte, 1).unwrap();

        let ids: Vec<_> = cart.lines().iter().map(|l| l.product_id).collect();
        assert_eq!(ids, [latte.id_typed(), kopi.id_typed()]);
    }

    #[test]
    fn update_item_sets_exact_quantity() {
        let (_, kopi, _) = setup();
        let mut cart = Cart::new();
        cart.add_item(&kopi, 2).unwrap();
        cart.update_item(kopi.id_typed(), 7).unwrap();
        assert_eq!(cart.quantity_of(kopi.id_typed()), Some(7));
    }

    #[test]
    fn update_item_to_zero_removes_line() {
        let (_, kopi, latte) = setup();
        let mut cart = Cart::new();
        cart.add_item(&kopi, 2).unwrap();
        cart.add_item(&latte, 1).unwrap();

        cart.update_item(kopi.id_typed(), 0).unwrap();
        assert_eq!(cart.quantity_of(kopi.id_typed()), None);
        assert_eq!(cart.len(), 1);

        cart.update_item(latte.id_typed(), -4).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn update_item_absent_line_is_not_found() {
        let (_, kopi, _) = setup();
        let mut cart = Cart::new();
        assert!(cart.update_item(kopi.id_typed(), 3).unwrap_err().is_not_found());
        // Removing an absent line is fine.
        cart.update_item(kopi.id_typed(), 0).unwrap();
    }

    #[test]
    fn update_item_rejects_quantity_above_u32() {
        let (_, kopi, _) = setup();
        let mut cart = Cart::new();
        cart.add_item(&kopi, 2).unwrap();

        let err = cart
            .update_item(kopi.id_typed(), i64::from(u32::MAX) + 1)
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
        assert_eq!(cart.quantity_of(kopi.id_typed()), Some(2));
    }

    #[test]
    fn remove_item_is_a_no_op_when_absent() {
        let (_, kopi, latte) = setup();
        let mut cart = Cart::new();
        cart.add_item(&kopi, 1).unwrap();
        assert!(!cart.remove_item(latte.id_typed()));
        assert!(cart.remove_item(kopi.id_typed()));
        assert!(cart.is_empty());
    }

    #[test]
    fn clear_empties_cart_but_not_catalog() {
        let (catalog, kopi, latte) = setup();
        let mut cart = Cart::new();
        cart.add_item(&kopi, 1).unwrap();
        cart.add_item(&latte, 1).unwrap();
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(catalog.len(), 2);
        assert_eq!(cart.total(&catalog).unwrap(), Money::ZERO);
    }

    #[test]
    fn total_uses_live_prices() {
        let (mut catalog, kopi, latte) = setup();
        let mut cart = Cart::new();
        cart.add_item(&kopi, 2).unwrap();
        cart.add_item(&latte, 1).unwrap();
        assert_eq!(cart.total(&catalog).unwrap(), Money::new(55_000));

        catalog.update("Latte", ProductUpdate::price(30_000)).unwrap();
        assert_eq!(cart.total(&catalog).unwrap(), Money::new(60_000));
    }

    #[test]
    fn total_follows_renamed_product() {
        let (mut catalog, kopi, _) = setup();
        let mut cart = Cart::new();
        cart.add_item(&kopi, 1).unwrap();
        catalog.update("Kopi Hitam", ProductUpdate::name("Kopi Tubruk")).unwrap();

        let lines = cart.priced_lines(&catalog).unwrap();
        assert_eq!(lines[0].name, "Kopi Tubruk");
        assert_eq!(cart.total(&catalog).unwrap(), Money::new(15_000));
    }

    #[test]
    fn total_rejects_dangling_line() {
        let (mut catalog, kopi, latte) = setup();
        let mut cart = Cart::new();
        cart.add_item(&kopi, 1).unwrap();
        cart.add_item(&latte, 1).unwrap();
        catalog.remove("Latte").unwrap();

        let err = cart.total(&catalog).unwrap_err();
        assert_eq!(err, DomainError::not_found(latte.id_typed().to_string()));

        assert_eq!(cart.prune_missing(&catalog), 1);
        assert_eq!(cart.total(&catalog).unwrap(), Money::new(15_000));
    }

    #[test]
    fn serializes_lines() {
        let (_, kopi, _) = setup();
        let mut cart = Cart::new();
        cart.add_item(&kopi, 2).unwrap();

        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(json["lines"][0]["quantity"], 2);
        assert_eq!(
            json["lines"][0]["product_id"],
            serde_json::Value::String(kopi.id_typed().to_string())
        );
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: repeated adds of one product collapse into a single line
            /// holding the sum of the quantities.
            #[test]
            fn adds_accumulate(quantities in prop::collection::vec(1u32..1_000, 1..20)) {
                let (catalog, kopi, _) = setup();
                let mut cart = Cart::new();
                for q in &quantities {
                    cart.add_item(&kopi, *q).unwrap();
                }

                let expected: u32 = quantities.iter().sum();
                prop_assert_eq!(cart.len(), 1);
                prop_assert_eq!(cart.quantity_of(kopi.id_typed()), Some(expected));
                prop_assert_eq!(
                    cart.total(&catalog).unwrap(),
                    Money::new(15_000 * u64::from(expected))
                );
            }

            /// Property: update_item never leaves a non-positive quantity behind.
            #[test]
            fn update_never_stores_non_positive(qty in -1_000i64..1_000) {
                let (_, kopi, _) = setup();
                let mut cart = Cart::new();
                cart.add_item(&kopi, 1).unwrap();
                cart.update_item(kopi.id_typed(), qty).unwrap();

                match cart.quantity_of(kopi.id_typed()) {
                    Some(q) => prop_assert_eq!(i64::from(q), qty),
                    None => prop_assert!(qty <= 0),
                }
            }
        }
    }
}
