//! Product catalog module.
//!
//! Contains the product type and the static catalog it is served from.

mod catalog;
mod product;

pub use catalog::Catalog;
pub use product::Product;
