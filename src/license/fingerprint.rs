/// Machine fingerprint used as the bot identifier
///
/// `BOT_ID` wins when set. Otherwise the id is
/// `"BOT-" + first 16 hex chars of sha256("{hostname}-{arch}")`.
use sha2::{Digest, Sha256};

const HOSTNAME_SOURCES: [&str; 2] = ["/proc/sys/kernel/hostname", "/etc/hostname"];

pub fn resolve_fingerprint(bot_id_override: &str) -> String {
    let trimmed = bot_id_override.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    derive_fingerprint(&local_hostname(), std::env::consts::ARCH)
}

pub fn derive_fingerprint(hostname: &str, arch: &str) -> String {
    let digest = Sha256::digest(format!("{}-{}", hostname, arch).as_bytes());
    let hex = format!("{:x}", digest);
    format!("BOT-{}", &hex[..16])
}

fn local_hostname() -> String {
    for source in HOSTNAME_SOURCES {
        if let Ok(contents) = std::fs::read_to_string(source) {
            let name = contents.trim();
            if !name.is_empty() {
                return name.to_string();
            }
        }
    }

    std::env::var("HOSTNAME")
        .ok()
        .filter(|h| !h.trim().is_empty())
        .unwrap_or_else(|| "localhost".to_string())
}
