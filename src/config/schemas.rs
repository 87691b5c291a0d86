/// Configuration schemas - every section declared once with its defaults
use crate::constants::{
    DEFAULT_ALLOWED_DOMAINS, DEFAULT_ENVIRONMENT_LABEL, DEFAULT_SERVICE_NAME,
    LICENSE_GRACE_DAYS, LICENSE_RECHECK_INTERVAL_SECS, LICENSE_TIMEOUT_SECS,
    OPENSEA_API_BASE_URL, OPENSEA_WEB_URL, REPORT_TIMEOUT_SECS, STATS_TIMEOUT_SECS,
};

// ============================================================================
// TELEGRAM
// ============================================================================

config_struct! {
    /// Telegram front-end settings (the bot token itself is a secret)
    pub struct TelegramConfig {
        /// Chat that receives security alerts (OWNER_TELEGRAM_ID)
        owner_chat_id: String = String::new(),
    }
}

// ============================================================================
// MARKETPLACE
// ============================================================================

config_struct! {
    /// Marketplace (OpenSea) API settings
    pub struct MarketplaceConfig {
        api_base_url: String = OPENSEA_API_BASE_URL.to_string(),

        /// Base of the collection links shown to users
        web_url: String = OPENSEA_WEB_URL.to_string(),

        timeout_secs: u64 = STATS_TIMEOUT_SECS,
    }
}

// ============================================================================
// LICENSE
// ============================================================================

config_struct! {
    /// License validation settings
    pub struct LicenseConfig {
        /// License server base URL; empty means validation always runs offline
        server_url: String = String::new(),

        /// Fingerprint override (BOT_ID); empty means derive from the host
        bot_id: String = String::new(),

        /// Install time in unix seconds (INSTALL_TIME); empty means first run
        install_time: String = String::new(),

        timeout_secs: u64 = LICENSE_TIMEOUT_SECS,

        grace_days: i64 = LICENSE_GRACE_DAYS,

        recheck_interval_secs: u64 = LICENSE_RECHECK_INTERVAL_SECS,
    }
}

// ============================================================================
// PROTECTION
// ============================================================================

config_struct! {
    /// Startup protection checks
    pub struct ProtectionConfig {
        /// Identifier shown in status snapshots (RAILWAY_SERVICE_NAME)
        service_name: String = DEFAULT_SERVICE_NAME.to_string(),

        /// Deployment hostname (RAILWAY_PUBLIC_DOMAIN)
        public_domain: String = String::new(),

        environment_label: String = DEFAULT_ENVIRONMENT_LABEL.to_string(),

        environment_check_enabled: bool = true,

        /// Hostname fragments the deployment must match
        allowed_domains: Vec<String> = DEFAULT_ALLOWED_DOMAINS.iter().map(|d| d.to_string()).collect(),

        /// Runtime tamper heuristic: "tracer-pid" or "disabled"
        tamper_heuristic: String = "tracer-pid".to_string(),

        /// Integrity manifest path; empty means the data directory default
        integrity_manifest: String = String::new(),

        /// Root that manifest paths are relative to; empty means the executable's directory
        integrity_root: String = String::new(),

        /// Tamper report endpoint; empty disables reporting
        monitoring_url: String = String::new(),

        report_timeout_secs: u64 = REPORT_TIMEOUT_SECS,
    }
}

// ============================================================================
// ROOT CONFIGURATION
// ============================================================================

config_struct! {
    /// Root configuration structure containing all sections
    pub struct Config {
        telegram: TelegramConfig = TelegramConfig::default(),
        marketplace: MarketplaceConfig = MarketplaceConfig::default(),
        license: LicenseConfig = LicenseConfig::default(),
        protection: ProtectionConfig = ProtectionConfig::default(),
    }
}
