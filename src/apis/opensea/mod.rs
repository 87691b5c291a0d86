/// OpenSea collection statistics client
///
/// Endpoint: `GET {base}/api/v2/collections/{slug}/stats` with the
/// `X-API-KEY` header. Any failure (transport, non-200, malformed body,
/// missing `total`) is reported as [`StatsUnavailable`]; nothing here panics
/// and nothing is retried or cached.
pub mod types;

pub use self::types::CollectionStats;

use crate::apis::client::HttpClient;
use crate::logger::{self, LogTag};
use reqwest::Url;
use serde_json::Value;
use thiserror::Error;

/// Why stats could not be obtained. Callers treat every variant the same way.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsUnavailable {
    #[error("collection identifier is empty")]
    EmptySlug,

    #[error("invalid collection identifier: {0}")]
    InvalidSlug(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("response has no 'total' field")]
    MissingTotal,
}

pub struct OpenSeaClient {
    http: HttpClient,
    base_url: Url,
    api_key: String,
}

impl OpenSeaClient {
    pub fn new(base_url: &str, api_key: &str, timeout_secs: u64) -> Result<Self, String> {
        let base = Url::parse(base_url)
            .map_err(|e| format!("Invalid marketplace URL '{}': {}", base_url, e))?;
        if base.cannot_be_a_base() {
            return Err(format!("Invalid marketplace URL '{}'", base_url));
        }

        Ok(Self {
            http: HttpClient::with_timeout_secs(timeout_secs)?,
            base_url: base,
            api_key: api_key.to_string(),
        })
    }

    /// Stats endpoint for `slug`, which is always a single encoded path segment
    pub fn stats_url(&self, slug: &str) -> Result<Url, StatsUnavailable> {
        if slug == "." || slug == ".." {
            return Err(StatsUnavailable::InvalidSlug(slug.to_string()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StatsUnavailable::InvalidSlug(slug.to_string()))?
            .pop_if_empty()
            .extend(["api", "v2", "collections", slug, "stats"]);
        Ok(url)
    }

    /// Fetch the aggregate statistics for a collection
    pub async fn fetch_stats(&self, slug: &str) -> Result<CollectionStats, StatsUnavailable> {
        let slug = slug.trim();
        if slug.is_empty() {
            return Err(StatsUnavailable::EmptySlug);
        }

        let url = self.stats_url(slug)?;
        logger::debug(LogTag::Api, &format!("Fetching stats: slug={}", slug));

        let response = self
            .http
            .client()
            .get(url)
            .header("Accept", "application/json")
            .header("X-API-KEY", &self.api_key)
            .send()
            .await
            .map_err(|e| {
                logger::error(LogTag::Api, &format!("Error fetching {}: {}", slug, e));
                StatsUnavailable::Transport(e.to_string())
            })?;

        let status = response.status();
        if status.as_u16() != 200 {
            logger::debug(
                LogTag::Api,
                &format!("Stats unavailable: slug={}, status={}", slug, status),
            );
            return Err(StatsUnavailable::Status(status.as_u16()));
        }

        let body: Value = response.json().await.map_err(|e| {
            logger::debug(
                LogTag::Api,
                &format!("Undecodable stats body: slug={}, error={}", slug, e),
            );
            StatsUnavailable::Malformed(e.to_string())
        })?;

        parse_stats_envelope(body)
    }
}

/// Extract `total` from a stats response body
pub fn parse_stats_envelope(body: Value) -> Result<CollectionStats, StatsUnavailable> {
    let total = match body {
        Value::Object(mut map) => map.remove("total").ok_or(StatsUnavailable::MissingTotal)?,
        _ => return Err(StatsUnavailable::MissingTotal),
    };

    serde_json::from_value(total).map_err(|e| StatsUnavailable::Malformed(e.to_string()))
}
