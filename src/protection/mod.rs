//! Startup protection
//!
//! ```text
//! protection/
//! ├── secrets.rs      # SecretStore (read once, redact on failure)
//! ├── monitor.rs      # required configuration, snapshot, health
//! ├── integrity.rs    # SHA-256 baseline verification and manifest
//! ├── environment.rs  # deployment host allowlist
//! ├── heuristics.rs   # runtime tamper heuristics
//! └── alerts.rs       # owner alerts
//! ```

pub mod alerts;
pub mod environment;
pub mod heuristics;
pub mod integrity;
pub mod monitor;
pub mod secrets;

pub use alerts::{AlertSink, NoopAlertSink, TelegramAlertSink};
pub use environment::is_allowed_host;
pub use heuristics::{heuristic_from_name, TamperHeuristic};
pub use integrity::{IntegrityBaseline, IntegrityChecker, ManifestError};
pub use monitor::{HealthReport, ProtectionMonitor, ProtectionSnapshot};
pub use secrets::{SecretKey, SecretStore};
