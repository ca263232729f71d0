use std::sync::Arc;

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{ContentAnalysis, RawAnalysis},
    services::providers::TextUnderstandingService,
};

const MIN_COMPLEXITY: f64 = 1.0;
const MAX_COMPLEXITY: f64 = 10.0;

/// Produces a structured analysis (summary, keywords, effort) of a reading item
#[derive(Clone)]
pub struct ContentAnalyzer {
    service: Arc<dyn TextUnderstandingService>,
}

impl ContentAnalyzer {
    pub fn new(service: Arc<dyn TextUnderstandingService>) -> Self {
        Self { service }
    }

    /// Analyzes an item identified by its title, its URL, or both
    pub async fn analyze(&self, title: Option<&str>, url: Option<&str>) -> AppResult<ContentAnalysis> {
        let title = title.map(str::trim).filter(|t| !t.is_empty());
        let url = url.map(str::trim).filter(|u| !u.is_empty());

        if title.is_none() && url.is_none() {
            return Err(AppError::InvalidInput(
                "Provide a title or a URL to analyze".to_string(),
            ));
        }

        let payload = self.service.analyze(&analysis_prompt(title, url)).await?;
        let analysis = parse_analysis(payload)?;

        tracing::info!(
            keywords = analysis.keywords.len(),
            complexity = analysis.complexity,
            provider = self.service.name(),
            "Content analyzed"
        );

        Ok(analysis)
    }
}

fn analysis_prompt(title: Option<&str>, url: Option<&str>) -> String {
    let mut content = String::new();
    if let Some(title) = title {
        content.push_str(&format!("Title: {}\n", title));
    }
    if let Some(url) = url {
        content.push_str(&format!("URL: {}\n", url));
    }

    format!(
        "Analyze the following content and provide:\n\
         1. A brief summary (2-3 sentences)\n\
         2. 5-7 key themes or keywords\n\
         3. Estimated reading time in minutes\n\
         4. Complexity score (1-10)\n\
         5. 3-5 main takeaways\n\
         \n\
         Respond with a JSON object with keys summary (string), keywords (array of strings), \
         readingTime (number), complexity (number) and takeaways (array of strings).\n\
         \n\
         {}",
        content
    )
}

fn parse_analysis(payload: serde_json::Value) -> AppResult<ContentAnalysis> {
    let raw: RawAnalysis = serde_json::from_value(payload)
        .map_err(|e| AppError::Extraction(format!("unexpected analysis shape: {}", e)))?;

    if raw.summary.trim().is_empty() {
        return Err(AppError::Extraction("analysis summary is empty".to_string()));
    }

    if !raw.reading_time.is_finite() || !raw.complexity.is_finite() {
        return Err(AppError::Extraction(
            "analysis contains non-numeric estimates".to_string(),
        ));
    }

    Ok(ContentAnalysis {
        summary: raw.summary.trim().to_string(),
        keywords: raw.keywords,
        reading_time_minutes: raw.reading_time.max(0.0).round() as u32,
        complexity: raw.complexity.clamp(MIN_COMPLEXITY, MAX_COMPLEXITY).round() as u8,
        takeaways: raw.takeaways,
        analyzed_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::MockTextUnderstandingService;
    use serde_json::json;

    fn sample_payload() -> serde_json::Value {
        json!({
            "summary": "An introduction to ownership in Rust.",
            "keywords": ["rust", "ownership", "borrowing"],
            "readingTime": 12.4,
            "complexity": 6,
            "takeaways": ["Values have one owner", "Borrows must not outlive owners"]
        })
    }

    #[tokio::test]
    async fn test_analyze_requires_title_or_url() {
        let mut service = MockTextUnderstandingService::new();
        service.expect_analyze().never();

        let analyzer = ContentAnalyzer::new(Arc::new(service));
        let result = analyzer.analyze(Some("  "), None).await;

        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_analyze_with_url_only() {
        let mut service = MockTextUnderstandingService::new();
        service
            .expect_analyze()
            .withf(|prompt| prompt.contains("URL: https://doc.rust-lang.org/book/") && !prompt.contains("Title:"))
            .times(1)
            .returning(|_| Ok(sample_payload()));
        service.expect_name().return_const("mock-llm");

        let analyzer = ContentAnalyzer::new(Arc::new(service));
        let analysis = analyzer
            .analyze(None, Some("https://doc.rust-lang.org/book/"))
            .await
            .unwrap();

        assert_eq!(analysis.keywords.len(), 3);
        assert_eq!(analysis.reading_time_minutes, 12);
        assert_eq!(analysis.complexity, 6);
    }

    #[test]
    fn test_parse_analysis_clamps_complexity() {
        let mut payload = sample_payload();
        payload["complexity"] = json!(14);
        assert_eq!(parse_analysis(payload).unwrap().complexity, 10);

        let mut payload = sample_payload();
        payload["complexity"] = json!(0);
        assert_eq!(parse_analysis(payload).unwrap().complexity, 1);
    }

    #[test]
    fn test_parse_analysis_missing_field() {
        let mut payload = sample_payload();
        payload.as_object_mut().unwrap().remove("takeaways");
        let result = parse_analysis(payload);
        assert!(matches!(result, Err(AppError::Extraction(_))));
    }

    #[test]
    fn test_parse_analysis_wrong_type() {
        let mut payload = sample_payload();
        payload["readingTime"] = json!("ten minutes");
        let result = parse_analysis(payload);
        assert!(matches!(result, Err(AppError::Extraction(_))));
    }

    #[test]
    fn test_parse_analysis_empty_summary() {
        let mut payload = sample_payload();
        payload["summary"] = json!("   ");
        let result = parse_analysis(payload);
        assert!(matches!(result, Err(AppError::Extraction(_))));
    }
}
