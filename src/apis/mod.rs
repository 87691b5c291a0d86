/// Outbound HTTP APIs
///
/// - `client`: shared reqwest wrapper with a fixed per-request timeout
/// - `opensea`: marketplace collection statistics
pub mod client;
pub mod opensea;

pub use client::HttpClient;
pub use opensea::{CollectionStats, OpenSeaClient, StatsUnavailable};
