/// In-process secret store
///
/// Secrets are read once from the environment into this store and handed
/// out from here. On a security failure the store is overwritten with a
/// placeholder; the process environment itself is never modified.
use crate::constants::REDACTED;
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecretKey {
    TelegramToken,
    MarketplaceApiKey,
    LicenseKey,
}

impl SecretKey {
    pub const ALL: [SecretKey; 3] = [
        SecretKey::TelegramToken,
        SecretKey::MarketplaceApiKey,
        SecretKey::LicenseKey,
    ];

    /// Environment variables checked in order; the first is the canonical name
    pub fn env_names(&self) -> &'static [&'static str] {
        match self {
            SecretKey::TelegramToken => &["TELEGRAM_TOKEN", "TELEGRAM_BOT_TOKEN"],
            SecretKey::MarketplaceApiKey => &["OPENSEA_API_KEY"],
            SecretKey::LicenseKey => &["LICENSE_KEY"],
        }
    }

    pub fn name(&self) -> &'static str {
        self.env_names()[0]
    }

    /// Required secrets must be present for the bot to start
    pub fn is_required(&self) -> bool {
        matches!(self, SecretKey::TelegramToken | SecretKey::MarketplaceApiKey)
    }
}

#[derive(Debug, Default)]
pub struct SecretStore {
    values: RwLock<HashMap<SecretKey, String>>,
}

impl SecretStore {
    /// Read secrets from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read secrets through an arbitrary lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut values = HashMap::new();
        for key in SecretKey::ALL {
            let found = key
                .env_names()
                .iter()
                .filter_map(|name| lookup(name))
                .map(|v| v.trim().to_string())
                .find(|v| !v.is_empty());
            if let Some(value) = found {
                values.insert(key, value);
            }
        }
        Self {
            values: RwLock::new(values),
        }
    }

    pub fn get(&self, key: SecretKey) -> Option<String> {
        self.values.read().get(&key).cloned()
    }

    /// Names of required secrets that are absent
    pub fn missing_required(&self) -> Vec<&'static str> {
        let values = self.values.read();
        SecretKey::ALL
            .iter()
            .filter(|key| key.is_required() && !values.contains_key(key))
            .map(|key| key.name())
            .collect()
    }

    /// Overwrite every stored secret with the redaction placeholder
    pub fn redact_all(&self) {
        let mut values = self.values.write();
        for value in values.values_mut() {
            *value = REDACTED.to_string();
        }
    }

    pub fn clear(&self) {
        self.values.write().clear();
    }

    pub fn is_redacted(&self) -> bool {
        let values = self.values.read();
        !values.is_empty() && values.values().all(|v| v == REDACTED)
    }
}
