/// Base HTTP client shared by the marketplace, license and reporting paths
///
/// Every call opens its own request with a fixed timeout. There is no retry
/// and no backoff; callers decide what a failure means.
use crate::constants::VERSION;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Result<Self, String> {
        if timeout.is_zero() {
            return Err("Timeout must be greater than zero".to_string());
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(format!("nftbot/{}", VERSION))
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

        Ok(Self { client, timeout })
    }

    pub fn with_timeout_secs(timeout_secs: u64) -> Result<Self, String> {
        Self::new(Duration::from_secs(timeout_secs))
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// POST a JSON body and return the raw response
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<reqwest::Response, String> {
        self.client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| format!("Request to {} failed: {}", url, e))
    }

    /// Best-effort POST: any outcome is reduced to a success flag
    pub async fn post_json_best_effort<T: Serialize + ?Sized>(&self, url: &str, body: &T) -> bool {
        match self.post_json(url, body).await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

/// Join a base URL and a path without doubling slashes
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
