//! Product catalog domain module.
//!
//! This crate owns the sellable products of one point-of-sale session: the
//! product records, their stock levels, and the uniqueness rules on the
//! catalog key (the trimmed product name). Pure in-memory logic, no IO.

pub mod catalog;
pub mod product;

pub use catalog::{ProductCatalog, ProductUpdate};
pub use product::{LOW_STOCK_THRESHOLD, NewProduct, Product, StockChange};
