/// Logger configuration, derived from command-line flags
///
/// Recognized flags:
/// - `--debug-<tag>` / `--debug-all`: enable DEBUG lines for a tag (or all)
/// - `--verbose` / `--verbose-<tag>`: enable VERBOSE lines
/// - `--quiet`: only errors
/// - `--log-tags=<a,b>`: restrict INFO/WARNING output to the listed tags
/// - `--no-log-file`: console only
use super::levels::LogLevel;
use super::tags::LogTag;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub min_level: LogLevel,
    pub debug_tags: HashSet<String>,
    pub verbose_tags: HashSet<String>,
    pub enabled_tags: HashSet<String>,
    pub file_logging: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            debug_tags: HashSet::new(),
            verbose_tags: HashSet::new(),
            enabled_tags: HashSet::new(),
            file_logging: true,
        }
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

pub fn get_logger_config() -> LoggerConfig {
    LOGGER_CONFIG.read().clone()
}

pub fn set_logger_config(config: LoggerConfig) {
    *LOGGER_CONFIG.write() = config;
}

/// Build the logger configuration from the process arguments
pub fn init_from_args() {
    let args = crate::arguments::get_cmd_args();
    set_logger_config(config_from_args(&args));
}

pub(crate) fn config_from_args(args: &[String]) -> LoggerConfig {
    let mut config = LoggerConfig::default();

    for arg in args {
        if arg == "--quiet" {
            config.min_level = LogLevel::Error;
        } else if arg == "--verbose" {
            config.min_level = LogLevel::Verbose;
        } else if arg == "--no-log-file" {
            config.file_logging = false;
        } else if arg == "--debug-all" {
            for tag in LogTag::ALL.iter() {
                config.debug_tags.insert(tag.to_debug_key());
            }
        } else if let Some(key) = arg.strip_prefix("--debug-") {
            if LogTag::from_debug_key(key).is_some() {
                config.debug_tags.insert(key.to_string());
            }
        } else if let Some(key) = arg.strip_prefix("--verbose-") {
            if LogTag::from_debug_key(key).is_some() {
                config.verbose_tags.insert(key.to_string());
            }
        } else if let Some(list) = arg.strip_prefix("--log-tags=") {
            config.enabled_tags = list
                .split(',')
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect();
        }
    }

    config
}

pub fn is_debug_enabled_for_tag(tag: &LogTag) -> bool {
    LOGGER_CONFIG.read().debug_tags.contains(&tag.to_debug_key())
}

pub fn is_verbose_enabled_for_tag(tag: &LogTag) -> bool {
    LOGGER_CONFIG.read().verbose_tags.contains(&tag.to_debug_key())
}
