//! Centralized path resolution
//!
//! All file and directory paths are resolved here so the bot behaves the
//! same from a terminal and inside a container.
//!
//! - `NFTBOT_HOME` overrides the base directory
//! - otherwise the platform data directory is used:
//!   `$XDG_DATA_HOME/NftStatsBot/` on Linux, `~/Library/Application Support/NftStatsBot/` on macOS
//!
//! ```text
//! NftStatsBot/
//! ├── data/
//! │   ├── config.toml
//! │   └── integrity.json
//! └── logs/
//!     └── nftbot_*.log
//! ```

use once_cell::sync::Lazy;
use std::path::PathBuf;

static BASE_DIRECTORY: Lazy<PathBuf> = Lazy::new(resolve_base_directory);

fn resolve_base_directory() -> PathBuf {
    const APP_DIR: &str = "NftStatsBot";

    if let Ok(home) = std::env::var("NFTBOT_HOME") {
        if !home.trim().is_empty() {
            return PathBuf::from(home);
        }
    }

    if let Some(dir) = dirs::data_local_dir() {
        return dir.join(APP_DIR);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(APP_DIR);
    }

    PathBuf::from(APP_DIR)
}

/// Returns the base directory for all bot data
pub fn get_base_directory() -> PathBuf {
    BASE_DIRECTORY.clone()
}

/// Returns the data directory path (config and integrity manifest)
pub fn get_data_directory() -> PathBuf {
    BASE_DIRECTORY.join("data")
}

pub fn get_logs_directory() -> PathBuf {
    BASE_DIRECTORY.join("logs")
}

/// Returns the main configuration file path
pub fn get_config_path() -> PathBuf {
    get_data_directory().join("config.toml")
}

/// Default location of the integrity manifest
pub fn get_integrity_manifest_path() -> PathBuf {
    get_data_directory().join("integrity.json")
}

/// Directory the running executable lives in; integrity paths are relative to it
pub fn get_install_root() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Create the data and logs directories
pub fn ensure_all_directories() -> Result<(), String> {
    for dir in [get_data_directory(), get_logs_directory()] {
        std::fs::create_dir_all(&dir)
            .map_err(|e| format!("Failed to create {}: {}", dir.display(), e))?;
    }
    Ok(())
}
