use crate::{
    error::{AppError, AppResult},
    models::{Candidate, KeywordSet},
};

pub const MAIN_TOPIC_WEIGHT: f64 = 3.0;
pub const SPECIFIC_CONCEPT_WEIGHT: f64 = 2.0;
pub const RELATED_TERM_WEIGHT: f64 = 1.0;
pub const MAX_SCORE: f64 = 10.0;

/// Mechanical relevance of a candidate to a keyword set, in `[0, 10]`
///
/// Each term found (case-insensitive substring) in the title or snippet adds
/// its tier weight. Terms are counted independently, so overlapping terms from
/// different tiers both contribute.
pub fn score(candidate: &Candidate, keywords: &KeywordSet) -> f64 {
    let text = candidate.searchable_text();

    let tier = |terms: &[String], weight: f64| -> f64 {
        terms
            .iter()
            .filter(|term| text.contains(&term.to_lowercase()))
            .count() as f64
            * weight
    };

    let raw = tier(keywords.main_topics(), MAIN_TOPIC_WEIGHT)
        + tier(keywords.specific_concepts(), SPECIFIC_CONCEPT_WEIGHT)
        + tier(keywords.related_terms(), RELATED_TERM_WEIGHT);

    raw.clamp(0.0, MAX_SCORE)
}

/// Arithmetic mean of the mechanical score and an AI judgement
///
/// The judgement is clamped to `[0, 10]` first so a misbehaving model cannot
/// push a result off the scale.
pub fn blend(mechanical: f64, judged: f64) -> f64 {
    (mechanical + judged.clamp(0.0, MAX_SCORE)) / 2.0
}

/// Prompt asking for one 0-10 relevance judgement per candidate
pub fn judgement_prompt(summary: &str, candidates: &[Candidate]) -> String {
    let listing: Vec<String> = candidates
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}. {} - {}", i + 1, c.title, c.snippet))
        .collect();

    format!(
        "Given this original summary:\n{}\n\n\
         Rate how relevant each of these search results is to it, from 0 to 10:\n{}\n\n\
         Respond with only a JSON array of {} numbers, in the same order as the results.",
        summary,
        listing.join("\n"),
        candidates.len()
    )
}

/// Parses a judgement reply, requiring exactly one number per candidate
pub fn parse_judgements(payload: serde_json::Value, expected: usize) -> AppResult<Vec<f64>> {
    let scores: Vec<f64> = serde_json::from_value(payload)
        .map_err(|e| AppError::Extraction(format!("relevance judgements malformed: {}", e)))?;

    if scores.len() != expected {
        return Err(AppError::Extraction(format!(
            "expected {} relevance judgements, got {}",
            expected,
            scores.len()
        )));
    }

    Ok(scores)
}
