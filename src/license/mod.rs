//! License validation
//!
//! A license is checked online against `{server}/validate` first. When the
//! server cannot be reached (or none is configured) the check falls back to
//! an offline grace window measured from `INSTALL_TIME`. The result is kept
//! in memory only; every check starts from scratch.
//!
//! Decision table:
//!
//! | situation                                  | status           |
//! |--------------------------------------------|------------------|
//! | no license key                             | `OnlineInvalid`  |
//! | HTTP 200, `valid: true`                    | `OnlineValid`    |
//! | HTTP 200, anything else in `valid`         | `OnlineInvalid`  |
//! | any other HTTP status                      | `OnlineInvalid`  |
//! | transport error / undecodable body         | offline rules    |
//! | offline, no install time                   | `OfflineGrace`   |
//! | offline, install time within grace window  | `OfflineGrace`   |
//! | offline, past the window or unparseable    | `OfflineExpired` |

mod fingerprint;
mod types;

pub use fingerprint::{derive_fingerprint, resolve_fingerprint};
pub use types::{LicenseState, LicenseStatus};
use types::{HeartbeatRequest, ValidateRequest, ValidateResponse};

use crate::apis::client::{join_url, HttpClient};
use crate::config::LicenseConfig;
use crate::logger::{self, LogTag};
use chrono::{DateTime, Duration, TimeZone, Utc};
use parking_lot::RwLock;

/// Outcome of the online step before any fallback
enum OnlineOutcome {
    Decided(LicenseStatus),
    Unreachable(String),
}

pub struct LicenseValidator {
    http: HttpClient,
    server_url: String,
    license_key: RwLock<Option<String>>,
    fingerprint: String,
    install_time: Option<String>,
    grace: Duration,
    state: RwLock<LicenseState>,
}

impl LicenseValidator {
    /// Build a validator; the fingerprint is computed once here
    pub fn new(license_key: Option<String>, config: &LicenseConfig) -> Result<Self, String> {
        let license_key = license_key.filter(|k| !k.trim().is_empty());
        let install_time = Some(config.install_time.trim().to_string()).filter(|t| !t.is_empty());
        let fingerprint = resolve_fingerprint(&config.bot_id);

        let state = LicenseState {
            license_key: license_key.clone(),
            bot_fingerprint: fingerprint.clone(),
            last_validated_at: None,
            valid_since_install: install_time.as_deref().and_then(parse_install_time),
            status: LicenseStatus::Unvalidated,
        };

        Ok(Self {
            http: HttpClient::with_timeout_secs(config.timeout_secs)?,
            server_url: config.server_url.trim().to_string(),
            license_key: RwLock::new(license_key),
            fingerprint,
            install_time,
            grace: Duration::days(config.grace_days),
            state: RwLock::new(state),
        })
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Snapshot of the last check
    pub fn state(&self) -> LicenseState {
        self.state.read().clone()
    }

    /// Drop every in-memory copy of the license key
    pub fn redact(&self) {
        *self.license_key.write() = None;
        self.state.write().license_key = None;
    }

    pub async fn is_valid(&self) -> bool {
        self.check().await.is_valid()
    }

    /// Run a full license check and record the result
    pub async fn check(&self) -> LicenseStatus {
        let key = self.license_key.read().clone();
        let status = match key.as_deref() {
            None => {
                logger::warning(LogTag::License, "No license key configured");
                LicenseStatus::OnlineInvalid
            }
            Some(key) => match self.validate_online(key).await {
                OnlineOutcome::Decided(status) => status,
                OnlineOutcome::Unreachable(reason) => {
                    logger::warning(
                        LogTag::License,
                        &format!("License server unavailable ({}), using offline validation", reason),
                    );
                    offline_status(self.install_time.as_deref(), Utc::now(), self.grace)
                }
            },
        };

        {
            let mut state = self.state.write();
            state.status = status;
            state.last_validated_at = Some(Utc::now());
        }

        if status.is_valid() {
            logger::info(LogTag::License, &format!("License check passed: {}", status));
        } else {
            logger::error(LogTag::License, &format!("License check failed: {}", status));
        }
        status
    }

    async fn validate_online(&self, key: &str) -> OnlineOutcome {
        if self.server_url.is_empty() {
            return OnlineOutcome::Unreachable("no license server configured".to_string());
        }

        let url = join_url(&self.server_url, "validate");
        let body = ValidateRequest {
            license_key: key,
            bot_id: &self.fingerprint,
            timestamp: Utc::now().to_rfc3339(),
        };

        let response = match self.http.post_json(&url, &body).await {
            Ok(response) => response,
            Err(e) => return OnlineOutcome::Unreachable(e),
        };

        let status = response.status();
        if status.as_u16() != 200 {
            logger::debug(
                LogTag::License,
                &format!("License server rejected request: status={}", status),
            );
            return OnlineOutcome::Decided(LicenseStatus::OnlineInvalid);
        }

        match response.json::<ValidateResponse>().await {
            Ok(parsed) if parsed.is_valid() => OnlineOutcome::Decided(LicenseStatus::OnlineValid),
            Ok(_) => OnlineOutcome::Decided(LicenseStatus::OnlineInvalid),
            Err(e) => OnlineOutcome::Unreachable(format!("undecodable response: {}", e)),
        }
    }

    /// Report liveness to the license server; failures are ignored
    pub async fn heartbeat(&self) {
        if self.server_url.is_empty() {
            return;
        }

        let url = join_url(&self.server_url, "heartbeat");
        let body = HeartbeatRequest {
            bot_id: &self.fingerprint,
            status: "running",
            users: 0,
        };

        if !self.http.post_json_best_effort(&url, &body).await {
            logger::debug(LogTag::License, "Heartbeat not acknowledged");
        }
    }
}

/// Offline decision from the recorded install time
pub fn offline_status(install_time: Option<&str>, now: DateTime<Utc>, grace: Duration) -> LicenseStatus {
    let raw = match install_time {
        None => return LicenseStatus::OfflineGrace,
        Some(raw) => raw,
    };

    match parse_install_time(raw) {
        Some(installed) if now.signed_duration_since(installed) < grace => {
            LicenseStatus::OfflineGrace
        }
        Some(_) => LicenseStatus::OfflineExpired,
        None => {
            logger::warning(
                LogTag::License,
                &format!("Unparseable INSTALL_TIME '{}'", raw),
            );
            LicenseStatus::OfflineExpired
        }
    }
}

/// Parse unix seconds, fractional values allowed
fn parse_install_time(raw: &str) -> Option<DateTime<Utc>> {
    let secs = raw.trim().parse::<f64>().ok().filter(|s| s.is_finite())?;
    let millis = (secs * 1000.0).round();
    if millis.abs() > i64::MAX as f64 {
        return None;
    }
    Utc.timestamp_millis_opt(millis as i64).single()
}
