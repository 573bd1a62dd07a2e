use serde::{Deserialize, Serialize};

use kedai_core::validation::{validate_name, validate_price};
use kedai_core::{DomainError, DomainResult, Entity, Money, ProductId};

use crate::product::{NewProduct, Product, StockChange};

/// (code, name, price, stock) of the default menu.
const DEFAULT_MENU: [(&str, &str, u64, i64); 2] = [
    ("P-001", "Kopi Hitam", 15_000, 20),
    ("P-002", "Latte", 25_000, 20),
];

/// How a stock operation finds its product.
#[derive(Debug, Copy, Clone)]
enum Lookup<'a> {
    Key(&'a str),
    Id(ProductId),
    Code(&'a str),
}

impl Lookup<'_> {
    fn matches(&self, product: &Product) -> bool {
        match *self {
            Lookup::Key(key) => product.matches_key(key),
            Lookup::Id(id) => *product.id() == id,
            Lookup::Code(code) => product.matches_code(code),
        }
    }

    fn not_found(&self) -> DomainError {
        match *self {
            Lookup::Key(key) | Lookup::Code(key) => DomainError::not_found(key.trim()),
            Lookup::Id(id) => DomainError::not_found(id.to_string()),
        }
    }
}

/// Partial update for [`ProductCatalog::update`]. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<i64>,
}

impl ProductUpdate {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            price: None,
        }
    }

    pub fn price(price: i64) -> Self {
        Self {
            name: None,
            price: Some(price),
        }
    }

    pub fn with_price(mut self, price: i64) -> Self {
        self.price = Some(price);
        self
    }
}

/// Ordered set of products, unique on the catalog key (trimmed name) and id.
///
/// Insertion order is preserved. Lookups are linear scans; a point-of-sale
/// catalog holds a handful of items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl ProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pre-seeded catalog. Every entry is validated as if created
    /// one by one.
    pub fn with_products(products: impl IntoIterator<Item = NewProduct>) -> DomainResult<Self> {
        let mut catalog = Self::new();
        for input in products {
            catalog.create_with(input)?;
        }
        Ok(catalog)
    }

    /// The default menu: Kopi Hitam (P-001) and Latte (P-002), 20 units
    /// each so neither starts out as low stock.
    pub fn seeded_default() -> Self {
        Self {
            products: DEFAULT_MENU
                .iter()
                .map(|&(code, name, price, stock)| {
                    Product::seed(code, name, Money::new(price), stock)
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Create a product with zero stock.
    pub fn create(&mut self, name: &str, price: i64) -> DomainResult<Product> {
        self.create_with(NewProduct::new(name, price))
    }

    /// Create a product from a full input record (stock and optional id).
    pub fn create_with(&mut self, input: NewProduct) -> DomainResult<Product> {
        let product = Product::create(input)?;

        if self.contains_key(product.name()) {
            return Err(DomainError::duplicate_key(product.name()));
        }
        if self.get_by_id(product.id_typed()).is_some() {
            return Err(DomainError::duplicate_key(product.id_typed().to_string()));
        }
        if let Some(code) = product.code() {
            if self.get_by_code(code).is_some() {
                return Err(DomainError::duplicate_key(code));
            }
        }

        tracing::debug!(
            product_id = %product.id_typed(),
            name = product.name(),
            price = product.price().units(),
            stock = product.stock(),
            "product created"
        );
        self.products.push(product.clone());
        Ok(product)
    }

    /// Snapshot of every product in insertion order.
    pub fn get_all(&self) -> Vec<Product> {
        self.products.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn get_by_key(&self, key: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.matches_key(key))
    }

    pub fn get_by_id(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| *p.id() == id)
    }

    pub fn get_by_code(&self, code: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.matches_code(code))
    }

    /// Same as [`Self::get_by_key`] but absent keys are an error.
    pub fn require(&self, key: &str) -> DomainResult<&Product> {
        self.get_by_key(key)
            .ok_or_else(|| DomainError::not_found(key.trim()))
    }

    /// Rename and/or reprice a product.
    ///
    /// Both fields are validated before either is written, so a failed update
    /// leaves the record untouched.
    pub fn update(&mut self, old_key: &str, update: ProductUpdate) -> DomainResult<Product> {
        let index = self
            .position(old_key)
            .ok_or_else(|| DomainError::not_found(old_key.trim()))?;

        let new_name = update.name.as_deref().map(validate_name).transpose()?;
        let new_price = update.price.map(validate_price).transpose()?;

        if let Some(name) = &new_name {
            let collides = self
                .products
                .iter()
                .enumerate()
                .any(|(i, p)| i != index && p.name() == name);
            if collides {
                return Err(DomainError::duplicate_key(name.clone()));
            }
        }

        let product = &mut self.products[index];
        if let Some(name) = new_name {
            product.set_name(name);
        }
        if let Some(price) = new_price {
            product.set_price(price);
        }

        tracing::debug!(
            product_id = %product.id_typed(),
            name = product.name(),
            price = product.price().units(),
            "product updated"
        );
        Ok(product.clone())
    }

    /// Remove a product immediately. Cart lines are not consulted here; see
    /// the session type in `kedai-cart` for the coordinated removal.
    pub fn remove(&mut self, key: &str) -> DomainResult<Product> {
        let index = self
            .position(key)
            .ok_or_else(|| DomainError::not_found(key.trim()))?;
        let removed = self.products.remove(index);
        tracing::debug!(product_id = %removed.id_typed(), name = removed.name(), "product removed");
        Ok(removed)
    }

    /// Increase stock; returns the new stock level.
    pub fn add_stock(&mut self, key: &str, amount: i64) -> DomainResult<i64> {
        self.restock(Lookup::Key(key), amount)
    }

    pub fn add_stock_by_id(&mut self, id: ProductId, amount: i64) -> DomainResult<i64> {
        self.restock(Lookup::Id(id), amount)
    }

    pub fn add_stock_by_code(&mut self, code: &str, amount: i64) -> DomainResult<i64> {
        self.restock(Lookup::Code(code), amount)
    }

    /// Decrease stock if enough is on hand; otherwise leave it unchanged and
    /// report [`StockChange::Rejected`].
    pub fn reduce_stock(&mut self, key: &str, amount: i64) -> DomainResult<StockChange> {
        self.destock(Lookup::Key(key), amount)
    }

    pub fn reduce_stock_by_id(&mut self, id: ProductId, amount: i64) -> DomainResult<StockChange> {
        self.destock(Lookup::Id(id), amount)
    }

    pub fn reduce_stock_by_code(&mut self, code: &str, amount: i64) -> DomainResult<StockChange> {
        self.destock(Lookup::Code(code), amount)
    }

    /// Products with stock below the low-stock threshold, in catalog order.
    pub fn low_stock_items(&self) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| p.is_low_stock())
            .cloned()
            .collect()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.products.iter().position(|p| p.matches_key(key))
    }

    fn find_mut(&mut self, lookup: Lookup<'_>) -> DomainResult<&mut Product> {
        self.products
            .iter_mut()
            .find(|p| lookup.matches(p))
            .ok_or_else(|| lookup.not_found())
    }

    fn restock(&mut self, lookup: Lookup<'_>, amount: i64) -> DomainResult<i64> {
        let product = self.find_mut(lookup)?;
        let stock = product.add_stock(amount)?;
        tracing::debug!(product_id = %product.id_typed(), name = product.name(), amount, stock, "stock added");
        Ok(stock)
    }

    fn destock(&mut self, lookup: Lookup<'_>, amount: i64) -> DomainResult<StockChange> {
        let product = self.find_mut(lookup)?;
        let change = product.reduce_stock(amount)?;
        match change {
            StockChange::Applied { remaining } => {
                tracing::debug!(
                    product_id = %product.id_typed(),
                    name = product.name(),
                    amount,
                    remaining,
                    "stock reduced"
                );
            }
            StockChange::Rejected {
                requested,
                available,
            } => {
                tracing::warn!(
                    product_id = %product.id_typed(),
                    name = product.name(),
                    requested,
                    available,
                    "stock reduction exceeds available stock; ignored"
                );
            }
        }
        Ok(change)
    }
}
