//! `kedai-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the catalog and
//! cart crates (no IO, no global state).

pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod validation;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::ProductId;
pub use money::Money;
