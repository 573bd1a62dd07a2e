//! Point-of-sale session: one catalog and one cart, owned together.
//!
//! The session is an explicit value handed to whatever request or UI context
//! drives it. Operations that touch both the catalog and the cart (removing a
//! product) go through here so the two never disagree.

use kedai_catalog::{NewProduct, Product, ProductCatalog, ProductUpdate, StockChange};
use kedai_core::{DomainResult, Money, ProductId};

use crate::cart::Cart;
use crate::receipt::{ReceiptConfig, receipt_text};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosSession {
    catalog: ProductCatalog,
    cart: Cart,
    receipt: ReceiptConfig,
}

impl Default for PosSession {
    fn default() -> Self {
        Self::new(ProductCatalog::seeded_default(), ReceiptConfig::default())
    }
}

impl PosSession {
    pub fn new(catalog: ProductCatalog, receipt: ReceiptConfig) -> Self {
        Self {
            catalog,
            cart: Cart::new(),
            receipt,
        }
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn receipt_config(&self) -> &ReceiptConfig {
        &self.receipt
    }

    // --- catalog ---

    pub fn create_product(&mut self, input: NewProduct) -> DomainResult<Product> {
        self.catalog.create_with(input)
    }

    /// Rename/reprice. Cart lines follow the product since they hold its id.
    pub fn update_product(&mut self, key: &str, update: ProductUpdate) -> DomainResult<Product> {
        self.catalog.update(key, update)
    }

    /// Remove a product from the catalog and drop its cart line in one step.
    pub fn remove_product(&mut self, key: &str) -> DomainResult<Product> {
        let removed = self.catalog.remove(key)?;
        if self.cart.remove_item(removed.id_typed()) {
            tracing::info!(
                product_id = %removed.id_typed(),
                name = removed.name(),
                "removed product was in the cart; line dropped"
            );
        }
        Ok(removed)
    }

    pub fn add_stock(&mut self, key: &str, amount: i64) -> DomainResult<i64> {
        self.catalog.add_stock(key, amount)
    }

    pub fn reduce_stock(&mut self, key: &str, amount: i64) -> DomainResult<StockChange> {
        self.catalog.reduce_stock(key, amount)
    }

    pub fn add_stock_by_id(&mut self, id: ProductId, amount: i64) -> DomainResult<i64> {
        self.catalog.add_stock_by_id(id, amount)
    }

    pub fn reduce_stock_by_id(&mut self, id: ProductId, amount: i64) -> DomainResult<StockChange> {
        self.catalog.reduce_stock_by_id(id, amount)
    }

    /// Restock by the clerk-entered product code (e.g. "P-001").
    pub fn add_stock_by_code(&mut self, code: &str, amount: i64) -> DomainResult<i64> {
        self.catalog.add_stock_by_code(code, amount)
    }

    pub fn reduce_stock_by_code(&mut self, code: &str, amount: i64) -> DomainResult<StockChange> {
        self.catalog.reduce_stock_by_code(code, amount)
    }

    // --- cart ---

    pub fn add_to_cart(&mut self, key: &str, quantity: u32) -> DomainResult<u32> {
        let product = self.catalog.require(key)?;
        self.cart.add_item(product, quantity)
    }

    pub fn update_cart(&mut self, key: &str, quantity: i64) -> DomainResult<()> {
        let product_id = self.catalog.require(key)?.id_typed();
        self.cart.update_item(product_id, quantity)
    }

    /// Remove a cart line by catalog key; unknown keys are a no-op.
    pub fn remove_from_cart(&mut self, key: &str) -> bool {
        match self.catalog.get_by_key(key) {
            Some(product) => self.cart.remove_item(product.id_typed()),
            None => false,
        }
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    pub fn total(&self) -> DomainResult<Money> {
        self.cart.total(&self.catalog)
    }

    pub fn receipt(&self) -> DomainResult<String> {
        receipt_text(&self.cart, &self.catalog, &self.receipt)
    }
}
