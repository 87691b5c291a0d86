/// Deployment monitor: required configuration, status snapshot and health
use super::secrets::SecretStore;
use crate::config::ProtectionConfig;
use crate::logger::{self, LogTag};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtectionSnapshot {
    pub fingerprint: String,
    pub start_time: DateTime<Utc>,
    #[serde(serialize_with = "serialize_uptime")]
    pub uptime: Duration,
    pub is_protected: bool,
    pub environment_label: String,
    pub status_label: String,
}

impl ProtectionSnapshot {
    pub fn uptime_label(&self) -> String {
        format_uptime(self.uptime)
    }
}

fn serialize_uptime<S: serde::Serializer>(uptime: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format_uptime(*uptime))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub service: String,
}

pub struct ProtectionMonitor {
    service_name: String,
    environment_label: String,
    public_domain: String,
    start_time: DateTime<Utc>,
    started: Instant,
}

impl ProtectionMonitor {
    pub fn new(config: &ProtectionConfig) -> Self {
        Self {
            service_name: config.service_name.clone(),
            environment_label: config.environment_label.clone(),
            public_domain: config.public_domain.clone(),
            start_time: Utc::now(),
            started: Instant::now(),
        }
    }

    /// All required secrets are present
    pub fn validate_environment(&self, secrets: &SecretStore) -> bool {
        let missing = secrets.missing_required();
        if !missing.is_empty() {
            logger::error(
                LogTag::Protection,
                &format!("Missing environment variables: {}", missing.join(", ")),
            );
            return false;
        }

        logger::info(LogTag::Protection, "Environment validation passed");
        true
    }

    pub fn log_startup(&self) {
        logger::info(LogTag::Protection, &format!("Bot ID: {}", self.service_name));
        logger::info(
            LogTag::Protection,
            &format!("Start time: {}", self.start_time.to_rfc3339()),
        );
        if !self.public_domain.is_empty() {
            logger::info(
                LogTag::Protection,
                &format!("Public URL: {}", self.public_domain),
            );
        }
    }

    pub fn snapshot(&self) -> ProtectionSnapshot {
        ProtectionSnapshot {
            fingerprint: self.service_name.clone(),
            start_time: self.start_time,
            uptime: self.started.elapsed(),
            is_protected: true,
            environment_label: self.environment_label.clone(),
            status_label: "active".to_string(),
        }
    }

    pub fn check_health(&self) -> HealthReport {
        HealthReport {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
            service: self.service_name.clone(),
        }
    }
}

/// "2d 03h 04m 05s", dropping leading zero units
pub fn format_uptime(uptime: Duration) -> String {
    let total = uptime.as_secs();
    let (days, hours, minutes, seconds) = (
        total / 86_400,
        (total % 86_400) / 3_600,
        (total % 3_600) / 60,
        total % 60,
    );

    if days > 0 {
        format!("{}d {:02}h {:02}m {:02}s", days, hours, minutes, seconds)
    } else if hours > 0 {
        format!("{}h {:02}m {:02}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {:02}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
