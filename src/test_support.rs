//! Helpers shared by unit tests
use crate::apis::OpenSeaClient;
use crate::config::ProtectionConfig;
use crate::protection::ProtectionMonitor;
use crate::telegram::context::AppContext;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Serve `router` on an ephemeral local port and return its base URL
pub async fn spawn_server(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Marketplace stub: `boredapeyachtclub` has stats, everything else is 404
pub async fn spawn_stats_server() -> String {
    async fn stats(Path(slug): Path<String>) -> (StatusCode, Json<Value>) {
        if slug == "boredapeyachtclub" {
            (
                StatusCode::OK,
                Json(json!({
                    "total": {
                        "floor_price": 12.3456789,
                        "volume": 500,
                        "sales": 10,
                        "num_owners": 4000
                    }
                })),
            )
        } else {
            (StatusCode::NOT_FOUND, Json(json!({"errors": ["not found"]})))
        }
    }

    spawn_server(Router::new().route("/api/v2/collections/:slug/stats", get(stats))).await
}

pub fn test_context(api_base_url: &str) -> AppContext {
    AppContext::new(
        OpenSeaClient::new(api_base_url, "test-key", 5).unwrap(),
        Arc::new(ProtectionMonitor::new(&ProtectionConfig::default())),
        "https://opensea.io",
    )
}

/// Environment lookup backed by a fixed list of pairs
pub fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let owned: Vec<(String, String)> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| {
        owned
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }
}

/// Alert sink that keeps every message
#[derive(Clone, Default)]
pub struct RecordingAlertSink {
    messages: Arc<parking_lot::Mutex<Vec<String>>>,
}

impl RecordingAlertSink {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

#[async_trait::async_trait]
impl crate::protection::AlertSink for RecordingAlertSink {
    async fn send_alert(&self, message: &str) -> bool {
        self.messages.lock().push(message.to_string());
        true
    }
}
