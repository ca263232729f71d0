mod analysis;
mod candidate;
mod category;
mod keywords;
mod query;

pub(crate) use analysis::RawAnalysis;
pub use analysis::ContentAnalysis;
pub use candidate::{Candidate, RecommendationResult, ScoredCandidate, SearchHit};
pub use category::{ContentCategory, VIDEO_HOSTS};
pub(crate) use keywords::RawKeywords;
pub use keywords::KeywordSet;
pub use query::{CategoryFilter, QuerySpec, SearchOptions};
