use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::ContentCategory;

const UNTITLED: &str = "Untitled";

/// One raw result as a search provider returned it, before validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: Option<String>,
    pub link: Option<String>,
    pub snippet: Option<String>,
    pub thumbnail_url: Option<String>,
}

/// A validated search result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub title: String,
    pub link: String,
    pub snippet: String,
    /// Link hostname without a leading `www.`
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl Candidate {
    /// Validates a raw hit; the link must be an absolute URL with a host
    pub fn from_hit(hit: SearchHit) -> AppResult<Self> {
        let link = hit
            .link
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .ok_or_else(|| AppError::MalformedCandidate("missing link".to_string()))?;

        let url = Url::parse(&link)
            .map_err(|e| AppError::MalformedCandidate(format!("invalid link {}: {}", link, e)))?;

        let host = url
            .host_str()
            .ok_or_else(|| AppError::MalformedCandidate(format!("link {} has no host", link)))?;
        let source = host.strip_prefix("www.").unwrap_or(host).to_string();

        let title = hit
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| UNTITLED.to_string());

        Ok(Self {
            title,
            link,
            snippet: hit.snippet.unwrap_or_default(),
            source,
            thumbnail_url: hit.thumbnail_url.filter(|t| !t.is_empty()),
        })
    }

    /// Text that relevance scoring matches against
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.title, self.snippet).to_lowercase()
    }
}

/// A candidate with its relevance score, as returned to callers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredCandidate {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub category: ContentCategory,
    pub relevance_score: f64,
}

/// Caller-facing name for a scored candidate
pub type RecommendationResult = ScoredCandidate;
