//! Search module.
//!
//! Contains the catalog query (term, category, sort) and name collation.

mod collate;
mod query;

pub use collate::locale_cmp;
pub use query::{Query, SortKey};
