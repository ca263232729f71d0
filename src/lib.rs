//! Content-relevance recommendations for a personal reading list.
//!
//! Free text is reduced to a tiered keyword set, turned into one search per
//! content category, and the search results are scored against the keywords
//! and ranked. External services (text understanding, web search) sit behind
//! traits in [`services::providers`].

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
