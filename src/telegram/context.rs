/// Shared state handed to every Telegram handler
use crate::apis::OpenSeaClient;
use crate::protection::ProtectionMonitor;
use std::sync::Arc;

pub struct AppContext {
    pub stats: OpenSeaClient,
    pub monitor: Arc<ProtectionMonitor>,
    /// Marketplace site used for collection links
    pub web_url: String,
}

impl AppContext {
    pub fn new(stats: OpenSeaClient, monitor: Arc<ProtectionMonitor>, web_url: &str) -> Self {
        Self {
            stats,
            monitor,
            web_url: web_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn collection_url(&self, slug: &str) -> String {
        format!("{}/collection/{}", self.web_url, slug)
    }
}
