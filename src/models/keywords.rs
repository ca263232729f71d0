use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Topic terms extracted from a piece of text, split into importance tiers
///
/// Terms are trimmed and unique (case-insensitive) across the whole set: a term
/// that already appeared in a higher tier is dropped from the lower ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordSet {
    main_topics: Vec<String>,
    specific_concepts: Vec<String>,
    related_terms: Vec<String>,
}

/// Shape the text-understanding service is asked to return
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawKeywords {
    pub main_topics: Vec<String>,
    pub specific_concepts: Vec<String>,
    #[serde(alias = "keyPhrases")]
    pub related_terms: Vec<String>,
}

impl KeywordSet {
    pub fn new(
        main_topics: Vec<String>,
        specific_concepts: Vec<String>,
        related_terms: Vec<String>,
    ) -> Self {
        let mut seen = HashSet::new();
        let main_topics = dedupe_tier(main_topics, &mut seen);
        let specific_concepts = dedupe_tier(specific_concepts, &mut seen);
        let related_terms = dedupe_tier(related_terms, &mut seen);

        Self {
            main_topics,
            specific_concepts,
            related_terms,
        }
    }

    /// Highest weight tier
    pub fn main_topics(&self) -> &[String] {
        &self.main_topics
    }

    pub fn specific_concepts(&self) -> &[String] {
        &self.specific_concepts
    }

    /// Lowest weight tier
    pub fn related_terms(&self) -> &[String] {
        &self.related_terms
    }

    pub fn is_empty(&self) -> bool {
        self.main_topics.is_empty()
            && self.specific_concepts.is_empty()
            && self.related_terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.main_topics.len() + self.specific_concepts.len() + self.related_terms.len()
    }
}

impl From<RawKeywords> for KeywordSet {
    fn from(raw: RawKeywords) -> Self {
        KeywordSet::new(raw.main_topics, raw.specific_concepts, raw.related_terms)
    }
}

fn dedupe_tier(terms: Vec<String>, seen: &mut HashSet<String>) -> Vec<String> {
    terms
        .into_iter()
        .map(|term| term.trim().to_string())
        .filter(|term| !term.is_empty())
        .filter(|term| seen.insert(term.to_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(terms: &[&str]) -> Vec<String> {
        terms.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_duplicates_within_tier_removed() {
        let keywords = KeywordSet::new(
            strings(&["Rust", "rust", " RUST "]),
            strings(&[]),
            strings(&[]),
        );
        assert_eq!(keywords.main_topics(), &["Rust".to_string()]);
    }

    #[test]
    fn test_first_tier_wins_across_tiers() {
        let keywords = KeywordSet::new(
            strings(&["transformers"]),
            strings(&["Transformers", "attention"]),
            strings(&["attention", "deep learning"]),
        );

        assert_eq!(keywords.main_topics(), &["transformers".to_string()]);
        assert_eq!(keywords.specific_concepts(), &["attention".to_string()]);
        assert_eq!(keywords.related_terms(), &["deep learning".to_string()]);
        assert_eq!(keywords.len(), 3);
    }

    #[test]
    fn test_blank_terms_dropped() {
        let keywords = KeywordSet::new(strings(&["", "   "]), strings(&[]), strings(&[]));
        assert!(keywords.is_empty());
    }

    #[test]
    fn test_raw_keywords_accepts_key_phrases_alias() {
        let json = r#"{
            "mainTopics": ["stoicism"],
            "specificConcepts": ["dichotomy of control"],
            "authors": ["Epictetus"],
            "keyPhrases": ["virtue ethics"]
        }"#;

        let raw: RawKeywords = serde_json::from_str(json).unwrap();
        let keywords = KeywordSet::from(raw);
        assert_eq!(keywords.related_terms(), &["virtue ethics".to_string()]);
    }

    #[test]
    fn test_raw_keywords_missing_tier_rejected() {
        let json = r#"{ "mainTopics": ["stoicism"], "specificConcepts": [] }"#;
        assert!(serde_json::from_str::<RawKeywords>(json).is_err());
    }
}
