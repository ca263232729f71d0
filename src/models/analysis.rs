use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Structured analysis of a single reading item
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAnalysis {
    pub summary: String,
    pub keywords: Vec<String>,
    pub reading_time_minutes: u32,
    /// 1 (introductory) to 10 (expert)
    pub complexity: u8,
    pub takeaways: Vec<String>,
    pub analyzed_at: DateTime<Utc>,
}

/// Shape the text-understanding service is asked to return
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawAnalysis {
    pub summary: String,
    pub keywords: Vec<String>,
    pub reading_time: f64,
    pub complexity: f64,
    pub takeaways: Vec<String>,
}
