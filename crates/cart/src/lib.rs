//! Checkout cart domain module.
//!
//! A [`Cart`] collects line items for one checkout session. Lines reference
//! catalog products by their stable [`kedai_core::ProductId`] and are priced
//! against the catalog at the time a total or receipt is computed.

pub mod cart;
pub mod receipt;
pub mod session;

pub use cart::{Cart, CartLine, PricedLine};
pub use receipt::{ReceiptConfig, receipt_text};
pub use session::PosSession;
