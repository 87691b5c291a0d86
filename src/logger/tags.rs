/// Log tags identify the subsystem a message comes from
///
/// Each tag maps to a `--debug-<key>` flag and a fixed-width console label.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Config,
    Api,
    License,
    Integrity,
    Protection,
    Telegram,
}

impl LogTag {
    pub const ALL: [LogTag; 7] = [
        LogTag::System,
        LogTag::Config,
        LogTag::Api,
        LogTag::License,
        LogTag::Integrity,
        LogTag::Protection,
        LogTag::Telegram,
    ];

    /// Key used in `--debug-<key>` / `--verbose-<key>` flags
    pub fn to_debug_key(&self) -> String {
        self.to_plain_string().to_lowercase()
    }

    /// Uncolored label, used for file output
    pub fn to_plain_string(&self) -> &'static str {
        match self {
            LogTag::System => "SYSTEM",
            LogTag::Config => "CONFIG",
            LogTag::Api => "API",
            LogTag::License => "LICENSE",
            LogTag::Integrity => "INTEGRITY",
            LogTag::Protection => "PROTECT",
            LogTag::Telegram => "TELEGRAM",
        }
    }

    /// Resolve a debug key back into a tag
    pub fn from_debug_key(key: &str) -> Option<LogTag> {
        LogTag::ALL
            .iter()
            .copied()
            .find(|tag| tag.to_debug_key() == key)
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}
