//! Catalog filter/sort query.

use std::fmt;
use std::str::FromStr;

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::search::collate::locale_cmp;
use serde::{Deserialize, Serialize};

/// Sort options for catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Keep catalog order.
    #[default]
    None,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
    /// Sort by name A-Z.
    NameAsc,
}

impl SortKey {
    /// Wire name, as used by the sort selector.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::None => "",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::NameAsc => "name-asc",
        }
    }

    /// Label shown above a sorted listing.
    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::None => "Featured",
            SortKey::PriceAsc => "Price: Low to High",
            SortKey::PriceDesc => "Price: High to Low",
            SortKey::NameAsc => "Name: A-Z",
        }
    }
}

impl FromStr for SortKey {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "none" => Ok(SortKey::None),
            "price-asc" => Ok(SortKey::PriceAsc),
            "price-desc" => Ok(SortKey::PriceDesc),
            "name-asc" => Ok(SortKey::NameAsc),
            other => Err(CommerceError::InvalidSortKey(other.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transient filter and sort over the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Search term matched case-insensitively against product names.
    pub term: String,
    /// Exact category to keep; `None` keeps all.
    pub category: Option<String>,
    /// Sort order.
    pub sort: SortKey,
}

impl Query {
    /// Create a query matching everything in catalog order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search term.
    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.term = term.into();
        self
    }

    /// Set the category filter. An empty category clears the filter.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.category = (!category.is_empty()).then_some(category);
        self
    }

    /// Set sort option.
    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Filter and sort `products`, returning a new sequence.
    ///
    /// Term and category predicates are ANDed. Sorting is stable, so ties
    /// keep their catalog order. The input is never reordered.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let term = self.term.trim().to_lowercase();
        let category = self.category.as_deref().filter(|c| !c.is_empty());

        let mut results: Vec<&Product> = products
            .iter()
            .filter(|p| term.is_empty() || p.name.to_lowercase().contains(&term))
            .filter(|p| category.map_or(true, |c| p.category == c))
            .collect();

        // `sort_by` is a stable merge sort
        match self.sort {
            SortKey::None => {}
            SortKey::PriceAsc => results.sort_by(|a, b| a.price.cmp(&b.price)),
            SortKey::PriceDesc => results.sort_by(|a, b| b.price.cmp(&a.price)),
            SortKey::NameAsc => results.sort_by(|a, b| locale_cmp(&a.name, &b.name)),
        }

        tracing::debug!(
            term = %term,
            category = ?category,
            sort = %self.sort,
            matches = results.len(),
            "catalog query applied"
        );

        results
    }
}
