//! Catalog filtering
//!
//! Search and category predicates used to derive the visible product list.

use serde::Deserialize;

use crate::products::Product;

/// Label of the category entry that disables category filtering.
pub const ALL_CATEGORIES: &str = "All";

/// Category constraint applied when filtering a catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum CategoryFilter {
    /// Every category matches.
    #[default]
    All,

    /// Only products whose category equals this value exactly.
    Only(String),
}

impl CategoryFilter {
    /// Maps a category label, as offered by [`Catalog::categories`](super::Catalog::categories),
    /// back into a filter.
    pub fn from_label(label: &str) -> Self {
        if label == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Only(label.to_string())
        }
    }

    /// The label this filter is offered under.
    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Only(category) => category,
        }
    }

    /// Whether a product in `category` passes this filter.
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(label: String) -> Self {
        if label == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Only(label)
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(label: &str) -> Self {
        Self::from_label(label)
    }
}

/// Free-text search plus category selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CatalogQuery {
    /// Case-insensitive substring matched against name and description.
    #[serde(default)]
    pub search: String,

    /// Category constraint.
    #[serde(default)]
    pub category: CategoryFilter,
}

impl CatalogQuery {
    /// A query matching every product.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search text.
    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Sets the category constraint.
    #[must_use]
    pub fn category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    pub(super) fn matcher(&self) -> QueryMatcher<'_> {
        QueryMatcher {
            needle: self.search.to_lowercase(),
            category: &self.category,
        }
    }
}

/// A query with its search text lowercased once up front.
#[derive(Debug)]
pub(super) struct QueryMatcher<'q> {
    needle: String,
    category: &'q CategoryFilter,
}

impl QueryMatcher<'_> {
    pub(super) fn matches(&self, product: &Product) -> bool {
        self.category.matches(&product.category) && self.matches_text(product)
    }

    fn matches_text(&self, product: &Product) -> bool {
        self.needle.is_empty()
            || product.name.to_lowercase().contains(&self.needle)
            || product.description.to_lowercase().contains(&self.needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_label_maps_to_sentinel() {
        assert_eq!(CategoryFilter::from_label("All"), CategoryFilter::All);
        assert_eq!(CategoryFilter::All.label(), "All");
    }

    #[test]
    fn other_labels_match_exactly() {
        let filter = CategoryFilter::from_label("Rings");

        assert!(filter.matches("Rings"));
        assert!(!filter.matches("rings"));
        assert!(!filter.matches("Earrings"));
    }

    #[test]
    fn query_deserializes_category_label() -> Result<(), serde_norway::Error> {
        let query: CatalogQuery = serde_norway::from_str("search: pearl\ncategory: Earrings\n")?;

        assert_eq!(query.search, "pearl");
        assert_eq!(query.category, CategoryFilter::Only("Earrings".to_string()));

        Ok(())
    }

    #[test]
    fn query_defaults_to_everything() -> Result<(), serde_norway::Error> {
        let query: CatalogQuery = serde_norway::from_str("{}")?;

        assert_eq!(query, CatalogQuery::new());
        assert_eq!(query.category, CategoryFilter::All);

        Ok(())
    }
}
