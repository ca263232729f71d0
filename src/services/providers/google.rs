/// Google Custom Search JSON API binding for `SearchService`
///
/// Owns the translation from `QuerySpec` to Google query operators, so nothing
/// upstream of this module knows about `site:` or quoted phrases.
use crate::{
    error::{AppError, AppResult},
    models::{ContentCategory, QuerySpec, SearchHit, SearchOptions},
    services::providers::SearchService,
};
use reqwest::Client as HttpClient;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ApiSearchResponse {
    #[serde(default)]
    items: Option<Vec<ApiItem>>,
}

#[derive(Debug, Deserialize)]
struct ApiItem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    snippet: Option<String>,
    #[serde(default)]
    pagemap: Option<ApiPagemap>,
}

#[derive(Debug, Deserialize)]
struct ApiPagemap {
    #[serde(default)]
    cse_thumbnail: Vec<ApiThumbnail>,
}

#[derive(Debug, Deserialize)]
struct ApiThumbnail {
    src: Option<String>,
}

impl From<ApiItem> for SearchHit {
    fn from(item: ApiItem) -> Self {
        let thumbnail_url = item
            .pagemap
            .and_then(|p| p.cse_thumbnail.into_iter().next())
            .and_then(|t| t.src);

        SearchHit {
            title: item.title,
            link: item.link,
            snippet: item.snippet,
            thumbnail_url,
        }
    }
}

#[derive(Clone)]
pub struct GoogleSearchClient {
    http_client: HttpClient,
    api_key: String,
    engine_id: String,
    api_url: String,
}

impl GoogleSearchClient {
    pub fn new(api_key: String, engine_id: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            engine_id,
            api_url,
        }
    }

    /// Query parameters for one Custom Search request
    fn request_params(&self, q: String, options: &SearchOptions) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("key", self.api_key.clone()),
            ("cx", self.engine_id.clone()),
            ("q", q),
            ("num", options.limit.to_string()),
        ];
        if options.category == ContentCategory::Video {
            params.push(("videoSyndicated", "true".to_string()));
        }
        params
    }
}

/// Renders a `QuerySpec` with Google search operators
pub fn render_query(query: &QuerySpec) -> String {
    let mut parts = vec![or_group(&query.required_any_of)];

    for group in &query.required_all_of {
        parts.push(format!("AND {}", or_group(group)));
    }

    let filter = &query.category_filter;
    if !filter.refinements.is_empty() {
        parts.push(format!("({})", filter.refinements.join(" OR ")));
    }

    match filter.include_sites.as_slice() {
        [] => {}
        [site] => parts.push(format!("site:{}", site)),
        sites => {
            let sites: Vec<String> = sites.iter().map(|s| format!("site:{}", s)).collect();
            parts.push(format!("({})", sites.join(" OR ")));
        }
    }

    for site in &filter.exclude_sites {
        parts.push(format!("-site:{}", site));
    }

    parts.join(" ")
}

fn or_group(terms: &[String]) -> String {
    let quoted: Vec<String> = terms
        .iter()
        .map(|term| format!("\"{}\"", term.replace('"', "")))
        .collect();
    format!("({})", quoted.join(" OR "))
}

#[async_trait::async_trait]
impl SearchService for GoogleSearchClient {
    async fn search(
        &self,
        query: &QuerySpec,
        options: &SearchOptions,
    ) -> AppResult<Vec<SearchHit>> {
        let url = format!("{}/customsearch/v1", self.api_url);
        let q = render_query(query);

        tracing::debug!(query = %q, category = %options.category, "Issuing web search");
        let params = self.request_params(q, options);

        let response = self
            .http_client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| AppError::Search(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Search(format!(
                "Google Search API returned status {}: {}",
                status, body
            )));
        }

        let results: ApiSearchResponse = response
            .json()
            .await
            .map_err(|e| AppError::Search(format!("invalid response body: {}", e)))?;

        let hits: Vec<SearchHit> = results
            .items
            .unwrap_or_default()
            .into_iter()
            .map(SearchHit::from)
            .collect();

        tracing::info!(
            category = %options.category,
            results = hits.len(),
            provider = self.name(),
            "Web search completed"
        );

        Ok(hits)
    }

    fn name(&self) -> &'static str {
        "google"
    }
}
