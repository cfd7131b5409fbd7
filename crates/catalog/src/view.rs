//! Derived catalog view: search filter, category filter, sort.
//!
//! The view is a pure transformation over a product slice. The three
//! parameters are independent: the search query narrows by text, the category
//! filter narrows by tag, and exactly one sort order is applied last.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use qhatu_core::{text, DomainError};

use crate::product::Product;

/// Ordering applied to the derived catalog view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Lexicographic ascending on the display name (case-folded).
    #[default]
    Name,
    /// Numeric ascending on price; ties keep their relative order.
    PriceLow,
    /// Numeric descending on price; ties keep their relative order.
    PriceHigh,
    /// Descending on the product code. The code is a proxy for recency, not
    /// a timestamp; kept as observed behavior.
    Newest,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Name => "name",
            SortOption::PriceLow => "price-low",
            SortOption::PriceHigh => "price-high",
            SortOption::Newest => "newest",
        }
    }
}

impl FromStr for SortOption {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match text::fold(s).as_str() {
            "name" => Ok(SortOption::Name),
            "price-low" => Ok(SortOption::PriceLow),
            "price-high" => Ok(SortOption::PriceHigh),
            "newest" => Ok(SortOption::Newest),
            _ => Err(DomainError::validation(
                "sort must be one of: name, price-low, price-high, newest",
            )),
        }
    }
}

/// Category narrowing: everything, or a single tag (compared case-insensitively).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Map a raw selector to a filter. Absent, blank or `all` (any case)
    /// means no narrowing.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None => CategoryFilter::All,
            Some(s) if s.trim().is_empty() || text::eq_fold(s, "all") => CategoryFilter::All,
            Some(s) => CategoryFilter::Only(s.to_string()),
        }
    }

    fn admits(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            // Untagged products never match a specific category.
            CategoryFilter::Only(wanted) => product
                .category
                .as_deref()
                .is_some_and(|tag| text::eq_fold(tag, wanted)),
        }
    }
}

/// View parameters for one render of the catalog screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogQuery {
    /// Free-text search; empty retains everything.
    pub search: String,
    pub category: CategoryFilter,
    pub sort: SortOption,
}

impl CatalogQuery {
    /// Derive the ordered view. The source is never mutated; the result is a
    /// new sequence containing only (and each at most once) items of the
    /// source.
    pub fn apply(&self, source: &[Product]) -> Vec<Product> {
        let mut view: Vec<Product> = source
            .iter()
            .filter(|p| self.matches_search(p) && self.category.admits(p))
            .cloned()
            .collect();

        // `sort_by` is stable, which is what keeps price ties in source order.
        match self.sort {
            SortOption::Name => view.sort_by(|a, b| text::fold(&a.name).cmp(&text::fold(&b.name))),
            SortOption::PriceLow => view.sort_by(|a, b| a.price_cents.cmp(&b.price_cents)),
            SortOption::PriceHigh => view.sort_by(|a, b| b.price_cents.cmp(&a.price_cents)),
            SortOption::Newest => view.sort_by(|a, b| b.code.as_str().cmp(a.code.as_str())),
        }

        view
    }

    /// OR across name, description and code; empty query matches everything.
    fn matches_search(&self, product: &Product) -> bool {
        if self.search.is_empty() {
            return true;
        }
        text::contains_fold(&product.name, &self.search)
            || text::contains_fold(&product.description, &self.search)
            || text::contains_fold(product.code.as_str(), &self.search)
    }
}
