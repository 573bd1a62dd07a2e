//! Demo configuration, loaded from the JSON file named by `KEDAI_CONFIG`.

use std::env::VarError;
use std::path::Path;

use anyhow::{Context, bail};
use serde::Deserialize;

use kedai_cart::ReceiptConfig;
use kedai_catalog::{NewProduct, ProductCatalog};
use kedai_observability::LogFormat;

pub const CONFIG_ENV: &str = "KEDAI_CONFIG";

/// A product to put in the cart during the demo checkout.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderLine {
    pub name: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_format: LogFormat,
    pub receipt: ReceiptConfig,
    /// Seed products. Empty means the default menu.
    pub products: Vec<NewProduct>,
    pub order: Vec<OrderLine>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_format: LogFormat::default(),
            receipt: ReceiptConfig::default(),
            products: Vec::new(),
            order: vec![
                OrderLine {
                    name: "Kopi Hitam".to_string(),
                    quantity: 2,
                },
                OrderLine {
                    name: "Latte".to_string(),
                    quantity: 1,
                },
            ],
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Read `KEDAI_CONFIG` if set, otherwise use defaults.
    pub fn from_env() -> anyhow::Result<(Self, Option<String>)> {
        Self::from_var(std::env::var(CONFIG_ENV))
    }

    fn from_var(var: Result<String, VarError>) -> anyhow::Result<(Self, Option<String>)> {
        match var {
            Ok(path) => Ok((Self::from_file(Path::new(&path))?, Some(path))),
            Err(VarError::NotPresent) => Ok((Self::default(), None)),
            Err(VarError::NotUnicode(raw)) => {
                bail!("{CONFIG_ENV} is not valid unicode: {}", raw.to_string_lossy())
            }
        }
    }

    pub fn catalog(&self) -> anyhow::Result<ProductCatalog> {
        if self.products.is_empty() {
            return Ok(ProductCatalog::seeded_default());
        }
        ProductCatalog::with_products(self.products.iter().cloned())
            .context("seeding catalog from config")
    }
}
