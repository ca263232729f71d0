use serde::Serialize;

use crate::models::ContentCategory;

/// Provider-agnostic description of one category search
///
/// `required_any_of` is an OR-group. Each inner group of `required_all_of`
/// must also match, by any one of its terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuerySpec {
    pub required_any_of: Vec<String>,
    pub required_all_of: Vec<Vec<String>>,
    pub category_filter: CategoryFilter,
}

/// Category-specific narrowing of a search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryFilter {
    /// Words of which at least one should appear (e.g. "book", "novel")
    pub refinements: Vec<String>,
    /// Restrict results to these hosts
    pub include_sites: Vec<String>,
    /// Drop results from these hosts
    pub exclude_sites: Vec<String>,
}

/// Per-call knobs passed to a search provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    pub category: ContentCategory,
    pub limit: usize,
}
