/// Shared constants
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// MARKETPLACE
// =============================================================================

pub const OPENSEA_API_BASE_URL: &str = "https://api.opensea.io";
pub const OPENSEA_WEB_URL: &str = "https://opensea.io";

/// Timeout for marketplace stats requests
pub const STATS_TIMEOUT_SECS: u64 = 10;

/// Currency shown when the upstream response does not name one
pub const DEFAULT_CURRENCY_SYMBOL: &str = "ETH";

// =============================================================================
// LICENSE
// =============================================================================

/// Timeout for license validation and heartbeat requests
pub const LICENSE_TIMEOUT_SECS: u64 = 5;

/// Offline grace window measured from INSTALL_TIME
pub const LICENSE_GRACE_DAYS: i64 = 30;

/// Interval of the background license re-check
pub const LICENSE_RECHECK_INTERVAL_SECS: u64 = 3600;

// =============================================================================
// PROTECTION
// =============================================================================

/// Timeout for tamper reports and alerts
pub const REPORT_TIMEOUT_SECS: u64 = 5;

/// Read size used when hashing files
pub const HASH_CHUNK_SIZE: usize = 4096;

/// Current integrity manifest format version
pub const MANIFEST_VERSION: u32 = 1;

pub const DEFAULT_SERVICE_NAME: &str = "nft-analytics-bot";
pub const DEFAULT_ENVIRONMENT_LABEL: &str = "railway";

/// Hostname fragments accepted by the deployment allowlist
pub const DEFAULT_ALLOWED_DOMAINS: [&str; 3] = ["railway.app", "up.railway.app", "localhost"];

/// Value written over secrets when the store is redacted
pub const REDACTED: &str = "REDACTED";
