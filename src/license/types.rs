use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of the most recent license check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LicenseStatus {
    Unvalidated,
    OnlineValid,
    OnlineInvalid,
    OfflineGrace,
    OfflineExpired,
}

impl LicenseStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, LicenseStatus::OnlineValid | LicenseStatus::OfflineGrace)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LicenseStatus::Unvalidated => "unvalidated",
            LicenseStatus::OnlineValid => "online-valid",
            LicenseStatus::OnlineInvalid => "online-invalid",
            LicenseStatus::OfflineGrace => "offline-grace",
            LicenseStatus::OfflineExpired => "offline-expired",
        }
    }
}

impl std::fmt::Display for LicenseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// In-memory license state; never persisted
#[derive(Debug, Clone, PartialEq)]
pub struct LicenseState {
    pub license_key: Option<String>,
    pub bot_fingerprint: String,
    pub last_validated_at: Option<DateTime<Utc>>,
    pub valid_since_install: Option<DateTime<Utc>>,
    pub status: LicenseStatus,
}

#[derive(Debug, Serialize)]
pub(super) struct ValidateRequest<'a> {
    pub license_key: &'a str,
    pub bot_id: &'a str,
    pub timestamp: String,
}

/// Body of a 200 response from `/validate`; `valid` is read as a boolean only
#[derive(Debug, Deserialize)]
pub(super) struct ValidateResponse {
    #[serde(default)]
    pub valid: Value,
}

impl ValidateResponse {
    pub fn is_valid(&self) -> bool {
        self.valid.as_bool().unwrap_or(false)
    }
}

#[derive(Debug, Serialize)]
pub(super) struct HeartbeatRequest<'a> {
    pub bot_id: &'a str,
    pub status: &'static str,
    pub users: u64,
}
