/// Configuration loading and access helpers
///
/// Load order: schema defaults, then the optional TOML file, then the
/// environment (including a `.env` file loaded by `main`).
use super::schemas::Config;
use crate::logger::{self, LogTag};
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::path::Path;

/// Global configuration instance
pub static CONFIG: OnceCell<RwLock<Config>> = OnceCell::new();

/// Load configuration and initialize the global CONFIG
///
/// `path` defaults to the data directory's `config.toml`. A missing file is
/// not an error; defaults are used.
pub fn load_config(path: Option<&str>) -> Result<(), String> {
    let path = path
        .map(|p| p.to_string())
        .unwrap_or_else(|| crate::paths::get_config_path().display().to_string());

    let mut config = read_config_file(&path)?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    CONFIG
        .set(RwLock::new(config))
        .map_err(|_| "Config already initialized".to_string())?;

    Ok(())
}

fn read_config_file(path: &str) -> Result<Config, String> {
    if !Path::new(path).exists() {
        logger::debug(
            LogTag::Config,
            &format!("Config file '{}' not found, using defaults", path),
        );
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file '{}': {}", path, e))?;

    let config = toml::from_str::<Config>(&contents)
        .map_err(|e| format!("Failed to parse config file '{}': {}", path, e))?;

    logger::info(LogTag::Config, &format!("Loaded config file '{}'", path));
    Ok(config)
}

/// Overlay environment variables onto a config
///
/// Only non-empty values override. `lookup` is `std::env::var` in production
/// and a map in tests.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = get("OWNER_TELEGRAM_ID") {
        config.telegram.owner_chat_id = v;
    }
    if let Some(v) = get("OPENSEA_API_URL") {
        config.marketplace.api_base_url = v;
    }
    if let Some(v) = get("LICENSE_SERVER_URL") {
        config.license.server_url = v;
    }
    if let Some(v) = get("BOT_ID") {
        config.license.bot_id = v;
    }
    if let Some(v) = get("INSTALL_TIME") {
        config.license.install_time = v;
    }
    if let Some(v) = get("RAILWAY_SERVICE_NAME") {
        config.protection.service_name = v;
    }
    if let Some(v) = get("RAILWAY_PUBLIC_DOMAIN") {
        config.protection.public_domain = v;
    }
    if let Some(v) = get("MONITORING_URL") {
        config.protection.monitoring_url = v;
    }
    if let Some(v) = get("INTEGRITY_MANIFEST") {
        config.protection.integrity_manifest = v;
    }
    if let Some(v) = get("TAMPER_HEURISTIC") {
        config.protection.tamper_heuristic = v;
    }
}

/// Execute a function with read access to the configuration
///
/// Falls back to defaults when `load_config` has not run (tests, tools).
///
/// ```rust,ignore
/// let timeout = with_config(|cfg| cfg.marketplace.timeout_secs);
/// ```
pub fn with_config<F, R>(f: F) -> R
where
    F: FnOnce(&Config) -> R,
{
    match CONFIG.get() {
        Some(lock) => f(&lock.read()),
        None => f(&Config::default()),
    }
}

/// Clone of the entire configuration, for use across await points
pub fn get_config_clone() -> Config {
    with_config(|cfg| cfg.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.marketplace.timeout_secs, 10);
        assert_eq!(config.license.timeout_secs, 5);
        assert_eq!(config.license.grace_days, 30);
        assert_eq!(config.license.recheck_interval_secs, 3600);
        assert_eq!(config.protection.service_name, "nft-analytics-bot");
        assert_eq!(
            config.protection.allowed_domains,
            vec!["railway.app", "up.railway.app", "localhost"]
        );
    }

    #[test]
    fn test_env_overrides_skip_empty_values() {
        let env: HashMap<&str, &str> = [
            ("BOT_ID", "BOT-custom"),
            ("INSTALL_TIME", "1700000000"),
            ("RAILWAY_PUBLIC_DOMAIN", "nft.up.railway.app"),
            ("RAILWAY_SERVICE_NAME", "  "),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        apply_env_overrides(&mut config, |k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.license.bot_id, "BOT-custom");
        assert_eq!(config.license.install_time, "1700000000");
        assert_eq!(config.protection.public_domain, "nft.up.railway.app");
        assert_eq!(config.protection.service_name, "nft-analytics-bot");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [marketplace]
            timeout_secs = 3

            [protection]
            tamper_heuristic = "disabled"
            "#,
        )
        .unwrap();

        assert_eq!(config.marketplace.timeout_secs, 3);
        assert_eq!(config.marketplace.api_base_url, "https://api.opensea.io");
        assert_eq!(config.protection.tamper_heuristic, "disabled");
        assert!(config.telegram.owner_chat_id.is_empty());
    }
}
