use serde::Deserialize;
use std::time::Duration;

/// Google Custom Search never returns more than this many results per page
pub const MAX_SEARCH_PAGE: usize = 10;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Anthropic API key used for keyword extraction and content analysis
    pub anthropic_api_key: String,

    /// Anthropic API base URL
    #[serde(default = "default_anthropic_api_url")]
    pub anthropic_api_url: String,

    #[serde(default = "default_anthropic_model")]
    pub anthropic_model: String,

    #[serde(default = "default_anthropic_max_tokens")]
    pub anthropic_max_tokens: u32,

    /// Google Custom Search API key
    pub google_api_key: String,

    /// Google Programmable Search Engine ID (`cx`)
    pub google_search_engine_id: String,

    /// Google APIs base URL
    #[serde(default = "default_google_search_url")]
    pub google_search_url: String,

    /// Redis connection URL; search caching is disabled when unset
    #[serde(default)]
    pub redis_url: Option<String>,

    #[serde(default = "default_search_cache_ttl_secs")]
    pub search_cache_ttl_secs: u64,

    /// Raw candidates kept per category before scoring
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,

    /// Blend mechanical relevance with a second AI-judged score
    #[serde(default)]
    pub ai_blend: bool,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_anthropic_api_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_anthropic_model() -> String {
    "claude-3-sonnet-20240229".to_string()
}

fn default_anthropic_max_tokens() -> u32 {
    1000
}

fn default_google_search_url() -> String {
    "https://www.googleapis.com".to_string()
}

fn default_search_cache_ttl_secs() -> u64 {
    3600
}

fn default_max_candidates() -> usize {
    MAX_SEARCH_PAGE
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>()
            .map(Config::normalized)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Load configuration from explicit key/value pairs
    pub fn from_iter<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)
            .map(Config::normalized)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    fn normalized(mut self) -> Self {
        self.max_candidates = self.max_candidates.clamp(1, MAX_SEARCH_PAGE);
        self.anthropic_api_url = self.anthropic_api_url.trim_end_matches('/').to_string();
        self.google_search_url = self.google_search_url.trim_end_matches('/').to_string();
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
