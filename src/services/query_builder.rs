use crate::{
    error::{AppError, AppResult},
    models::{CategoryFilter, ContentCategory, KeywordSet, QuerySpec, VIDEO_HOSTS},
};

/// Number of specific concepts folded into the required group
const REQUIRED_CONCEPTS: usize = 2;

/// Builds the search query for one category from extracted keywords
///
/// Pure: the same keywords and category always produce the same `QuerySpec`.
/// Fails with `InvalidInput` when there are no main topics to search for.
pub fn build(keywords: &KeywordSet, category: ContentCategory) -> AppResult<QuerySpec> {
    if keywords.main_topics().is_empty() {
        return Err(AppError::InvalidInput(format!(
            "No main topics to build a {} query from",
            category
        )));
    }

    let concepts: Vec<String> = keywords
        .specific_concepts()
        .iter()
        .take(REQUIRED_CONCEPTS)
        .cloned()
        .collect();

    let required_all_of = if concepts.is_empty() {
        vec![]
    } else {
        vec![concepts]
    };

    Ok(QuerySpec {
        required_any_of: keywords.main_topics().to_vec(),
        required_all_of,
        category_filter: category_filter(category),
    })
}

/// Source restrictions and refinement words for each category
pub fn category_filter(category: ContentCategory) -> CategoryFilter {
    match category {
        ContentCategory::Video => CategoryFilter {
            refinements: vec![],
            include_sites: words(VIDEO_HOSTS),
            exclude_sites: vec![],
        },
        ContentCategory::Book => CategoryFilter {
            refinements: words(&["book", "novel", "publication"]),
            include_sites: vec![],
            exclude_sites: words(VIDEO_HOSTS),
        },
        ContentCategory::Article => CategoryFilter {
            refinements: words(&["article", "research", "paper", "analysis"]),
            include_sites: vec![],
            exclude_sites: words(VIDEO_HOSTS),
        },
        ContentCategory::Report => CategoryFilter {
            refinements: words(&["report", "whitepaper", "study"]),
            include_sites: vec![],
            exclude_sites: words(VIDEO_HOSTS),
        },
        ContentCategory::Academic => CategoryFilter {
            refinements: words(&["research", "paper", "study"]),
            include_sites: words(&["scholar.google.com", "arxiv.org", "researchgate.net"]),
            exclude_sites: vec![],
        },
        ContentCategory::Website => CategoryFilter {
            refinements: vec![],
            include_sites: vec![],
            exclude_sites: words(VIDEO_HOSTS),
        },
    }
}

fn words(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|t| t.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(terms: &[&str]) -> Vec<String> {
        terms.iter().map(|t| t.to_string()).collect()
    }

    fn transformer_keywords() -> KeywordSet {
        KeywordSet::new(
            strings(&["transformers", "NLP"]),
            strings(&["attention mechanism", "self-attention", "positional encoding"]),
            strings(&["deep learning"]),
        )
    }

    #[test]
    fn test_build_uses_main_topics_and_first_two_concepts() {
        let query = build(&transformer_keywords(), ContentCategory::Article).unwrap();

        assert_eq!(query.required_any_of, strings(&["transformers", "NLP"]));
        assert_eq!(
            query.required_all_of,
            vec![strings(&["attention mechanism", "self-attention"])]
        );
    }

    #[test]
    fn test_build_single_concept() {
        let keywords = KeywordSet::new(strings(&["rust"]), strings(&["borrow checker"]), vec![]);
        let query = build(&keywords, ContentCategory::Book).unwrap();
        assert_eq!(query.required_all_of, vec![strings(&["borrow checker"])]);
    }

    #[test]
    fn test_build_without_concepts_omits_group() {
        let keywords = KeywordSet::new(strings(&["rust"]), vec![], strings(&["systems"]));
        let query = build(&keywords, ContentCategory::Book).unwrap();
        assert!(query.required_all_of.is_empty());
    }

    #[test]
    fn test_build_without_main_topics_fails() {
        let keywords = KeywordSet::new(vec![], strings(&["borrow checker"]), vec![]);
        let result = build(&keywords, ContentCategory::Video);
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_build_is_deterministic() {
        let keywords = transformer_keywords();
        let first = build(&keywords, ContentCategory::Video).unwrap();
        let second = build(&keywords, ContentCategory::Video).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_video_filter_restricts_to_video_hosts() {
        let query = build(&transformer_keywords(), ContentCategory::Video).unwrap();
        let filter = &query.category_filter;

        assert!(filter.include_sites.contains(&"youtube.com".to_string()));
        assert!(filter.exclude_sites.is_empty());
        assert_ne!(filter, &category_filter(ContentCategory::Book));
    }

    #[test]
    fn test_book_and_article_exclude_video_hosts() {
        for category in [ContentCategory::Book, ContentCategory::Article] {
            let filter = category_filter(category);
            assert!(filter.include_sites.is_empty());
            assert!(filter.exclude_sites.contains(&"youtube.com".to_string()));
        }
        assert!(category_filter(ContentCategory::Book)
            .refinements
            .contains(&"book".to_string()));
        assert!(category_filter(ContentCategory::Article)
            .refinements
            .contains(&"research".to_string()));
    }

    #[test]
    fn test_academic_filter_restricts_to_scholarly_hosts() {
        let filter = category_filter(ContentCategory::Academic);
        assert_eq!(
            filter.include_sites,
            strings(&["scholar.google.com", "arxiv.org", "researchgate.net"])
        );
    }
}
