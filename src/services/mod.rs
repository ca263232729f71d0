pub mod analysis;
pub mod keywords;
pub mod providers;
pub mod query_builder;
pub mod ranking;
pub mod recommendations;
pub mod scoring;

pub use analysis::ContentAnalyzer;
pub use keywords::KeywordExtractor;
pub use recommendations::{RecommendationOptions, RecommendationOrchestrator, RecommendationSet};
