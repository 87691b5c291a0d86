//! Configuration system
//!
//! Non-secret settings live in a [`Config`] tree with embedded defaults,
//! optionally loaded from a TOML file and always overlaid with environment
//! variables. Secrets (bot token, API key, license key) are kept out of this
//! tree; see [`crate::protection::secrets`].
//!
//! ```rust,ignore
//! use nftbot::config::{load_config, with_config};
//!
//! load_config(None)?;
//! let timeout = with_config(|cfg| cfg.marketplace.timeout_secs);
//! ```

#[macro_use]
pub mod macros;
pub mod schemas;
pub mod utils;

pub use schemas::*;
pub use utils::{apply_env_overrides, get_config_clone, load_config, with_config};
