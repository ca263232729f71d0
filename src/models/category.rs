use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Hosts treated as video platforms for filtering and link inference
pub const VIDEO_HOSTS: &[&str] = &["youtube.com", "vimeo.com"];

const BOOK_HOSTS: &[&str] = &["books.google.com", "amazon.com", "goodreads.com"];

/// Kind of content a recommendation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentCategory {
    Book,
    Article,
    Video,
    Website,
    Report,
    Academic,
}

impl ContentCategory {
    /// Categories searched when a caller does not ask for specific ones
    pub const DEFAULTS: [ContentCategory; 3] = [
        ContentCategory::Book,
        ContentCategory::Article,
        ContentCategory::Video,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentCategory::Book => "book",
            ContentCategory::Article => "article",
            ContentCategory::Video => "video",
            ContentCategory::Website => "website",
            ContentCategory::Report => "report",
            ContentCategory::Academic => "academic",
        }
    }

    /// Best-effort guess of a link's category from its URL
    ///
    /// Only distinguishes video, book and article; everything that is not a
    /// known video or book host is treated as an article.
    pub fn infer_from_link(link: &str) -> ContentCategory {
        let link = link.to_lowercase();
        if VIDEO_HOSTS.iter().any(|host| link.contains(host)) {
            ContentCategory::Video
        } else if BOOK_HOSTS.iter().any(|host| link.contains(host)) {
            ContentCategory::Book
        } else {
            ContentCategory::Article
        }
    }
}

impl Display for ContentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
