use crate::models::ScoredCandidate;

/// Orders candidates by descending relevance
///
/// The sort is stable: equal scores keep the order the search provider
/// returned them in. Nothing is truncated here.
pub fn rank(mut scored: Vec<ScoredCandidate>) -> Vec<ScoredCandidate> {
    scored.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
    scored
}
