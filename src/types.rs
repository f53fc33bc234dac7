use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// One summarized news cluster for a given day, with the articles that fed it.
///
/// `processed_at` and article dates carry the canonical textual timestamp form
/// produced by [`format_timestamp`]; rows never leave this crate with a raw
/// database representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Digest {
    pub id: i64,
    /// Multi-line summary text, one bullet point per line.
    pub summary: String,
    pub cluster_id: i64,
    pub processed_at: String,
    /// Empty when no articles reference this digest, never absent.
    pub articles: Vec<Article>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub url: String,
    /// May be empty; consumers render their own "Untitled" fallback.
    pub title: String,
    /// Original publication timestamp, `None` when the store has none.
    pub date: Option<String>,
    /// Display name of the outlet, derived from `url` on every read.
    pub source: String,
}

/// Canonical textual form for every timestamp leaving this crate:
/// RFC 3339 with millisecond precision and a `Z` suffix.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, thiserror::Error)]
pub enum DigestError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DigestError>;
