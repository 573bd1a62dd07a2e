use serde::{Deserialize, Serialize};

use kedai_core::validation::{validate_amount, validate_code, validate_name, validate_price};
use kedai_core::{DomainError, DomainResult, Entity, Money, ProductId};

/// Stock strictly below this many units counts as low stock.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// A sellable product.
///
/// Fields are private: products are only created, renamed, repriced and
/// restocked through [`crate::ProductCatalog`], which keeps the catalog key
/// unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    id: ProductId,
    code: Option<String>,
    name: String,
    price: Money,
    stock: i64,
}

/// Input for creating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    /// Price in whole currency units.
    pub price: i64,
    #[serde(default)]
    pub stock: i64,
    /// Explicit identifier; a fresh one is generated when absent.
    #[serde(default)]
    pub id: Option<ProductId>,
    /// Product code entered by the clerk (e.g. "P-001"). Unique when set.
    #[serde(default)]
    pub code: Option<String>,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, price: i64) -> Self {
        Self {
            name: name.into(),
            price,
            stock: 0,
            id: None,
            code: None,
        }
    }

    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_id(mut self, id: ProductId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// Outcome of a stock reduction.
///
/// Asking for more than is on hand is not an error: the stock is left as it
/// was and the rejection is reported here instead.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StockChange {
    Applied { remaining: i64 },
    Rejected { requested: i64, available: i64 },
}

impl StockChange {
    pub fn is_applied(&self) -> bool {
        matches!(self, StockChange::Applied { .. })
    }
}

impl Product {
    /// Validate input and build a product.
    pub fn create(input: NewProduct) -> DomainResult<Self> {
        let code = input.code.as_deref().map(validate_code).transpose()?;
        let name = validate_name(&input.name)?;
        let price = validate_price(input.price)?;
        let stock = validate_amount(input.stock)
            .map_err(|_| DomainError::invalid_argument("initial stock cannot be negative"))?;

        Ok(Self {
            id: input.id.unwrap_or_default(),
            code,
            name,
            price,
            stock,
        })
    }

    /// Known-good seed entry; bypasses validation.
    pub(crate) fn seed(code: &str, name: &str, price: Money, stock: i64) -> Self {
        Self {
            id: ProductId::new(),
            code: Some(code.to_string()),
            name: name.to_string(),
            price,
            stock,
        }
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn stock(&self) -> i64 {
        self.stock
    }

    pub fn is_low_stock(&self) -> bool {
        self.stock < LOW_STOCK_THRESHOLD
    }

    /// Whether `key` (trimmed) names this product.
    pub fn matches_key(&self, key: &str) -> bool {
        self.name == key.trim()
    }

    /// Whether `code` (trimmed) is this product's code.
    pub fn matches_code(&self, code: &str) -> bool {
        self.code.as_deref() == Some(code.trim())
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn set_price(&mut self, price: Money) {
        self.price = price;
    }

    pub(crate) fn add_stock(&mut self, amount: i64) -> DomainResult<i64> {
        let amount = validate_amount(amount)?;
        self.stock = self
            .stock
            .checked_add(amount)
            .ok_or_else(|| DomainError::invalid_argument("stock overflow"))?;
        Ok(self.stock)
    }

    pub(crate) fn reduce_stock(&mut self, amount: i64) -> DomainResult<StockChange> {
        let amount = validate_amount(amount)?;
        if amount > self.stock {
            return Ok(StockChange::Rejected {
                requested: amount,
                available: self.stock,
            });
        }
        self.stock -= amount;
        Ok(StockChange::Applied {
            remaining: self.stock,
        })
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
