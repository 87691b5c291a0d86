//! File integrity verification
//!
//! The baseline is a versioned JSON manifest mapping install-relative paths
//! to SHA-256 hex digests:
//!
//! ```json
//! { "version": 1, "files": { "nftbot": "9f86d0…", "config.toml": "…" } }
//! ```
//!
//! It is produced at build time by the `integrity_manifest` binary. At
//! startup every listed file that exists is re-hashed and compared. A
//! missing file is not evidence of tampering and is skipped; an existing
//! file that cannot be read counts as a mismatch.

use crate::apis::client::HttpClient;
use crate::constants::{HASH_CHUNK_SIZE, MANIFEST_VERSION};
use crate::logger::{self, LogTag};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("manifest not found at {0}")]
    NotFound(PathBuf),

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid manifest JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unsupported manifest version {0}")]
    UnsupportedVersion(u32),

    #[error("manifest path '{0}' must be relative and stay inside the install root")]
    InvalidEntry(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrityBaseline {
    pub version: u32,
    pub files: BTreeMap<String, String>,
}

impl Default for IntegrityBaseline {
    fn default() -> Self {
        Self {
            version: MANIFEST_VERSION,
            files: BTreeMap::new(),
        }
    }
}

impl IntegrityBaseline {
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        let baseline: IntegrityBaseline = serde_json::from_str(json)?;
        if baseline.version != MANIFEST_VERSION {
            return Err(ManifestError::UnsupportedVersion(baseline.version));
        }
        for entry in baseline.files.keys() {
            validate_entry(entry)?;
        }
        Ok(baseline)
    }

    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        if !path.exists() {
            return Err(ManifestError::NotFound(path.to_path_buf()));
        }
        let json = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: &Path) -> Result<(), ManifestError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn validate_entry(entry: &str) -> Result<(), ManifestError> {
    let path = Path::new(entry);
    let escapes = path
        .components()
        .any(|c| !matches!(c, std::path::Component::Normal(_) | std::path::Component::CurDir));
    if entry.is_empty() || escapes {
        return Err(ManifestError::InvalidEntry(entry.to_string()));
    }
    Ok(())
}

/// SHA-256 of a file, read in fixed-size chunks
pub fn hash_file(path: &Path) -> std::io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; HASH_CHUNK_SIZE];
    loop {
        let read = file.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

/// Hash `files` (relative to `root`) into a new baseline
pub fn generate_manifest(root: &Path, files: &[String]) -> Result<IntegrityBaseline, ManifestError> {
    let mut baseline = IntegrityBaseline::default();
    for entry in files {
        validate_entry(entry)?;
        let path = root.join(entry);
        let digest = hash_file(&path).map_err(|source| ManifestError::Io {
            path: path.clone(),
            source,
        })?;
        baseline.files.insert(entry.clone(), digest);
    }
    Ok(baseline)
}

/// Outcome of comparing one baseline entry with the file on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryStatus {
    Match,
    Missing,
    Changed { found: String },
}

/// Compare one manifest entry; an unreadable file is `Changed`
pub fn check_entry(root: &Path, entry: &str, expected: &str) -> EntryStatus {
    let path = root.join(entry);
    if !path.exists() {
        return EntryStatus::Missing;
    }

    let found = match hash_file(&path) {
        Ok(digest) => digest,
        Err(e) => format!("unreadable ({})", e),
    };
    if found.eq_ignore_ascii_case(expected) {
        EntryStatus::Match
    } else {
        EntryStatus::Changed { found }
    }
}

/// Status of every entry in `baseline`, in manifest order
pub fn verify_baseline(root: &Path, baseline: &IntegrityBaseline) -> Vec<(String, EntryStatus)> {
    baseline
        .files
        .iter()
        .map(|(entry, expected)| (entry.clone(), check_entry(root, entry, expected)))
        .collect()
}

/// Where tamper events are reported
struct TamperReporter {
    http: HttpClient,
    url: String,
}

#[derive(Serialize)]
struct TamperReport<'a> {
    event: &'static str,
    file: &'a str,
    bot_id: &'a str,
    timestamp: String,
}

pub struct IntegrityChecker {
    root: PathBuf,
    baseline: IntegrityBaseline,
    bot_id: String,
    reporter: Option<TamperReporter>,
}

impl IntegrityChecker {
    pub fn new(root: PathBuf, baseline: IntegrityBaseline, bot_id: &str) -> Self {
        Self {
            root,
            baseline,
            bot_id: bot_id.to_string(),
            reporter: None,
        }
    }

    /// Send tamper events to `url`; an empty url disables reporting
    pub fn with_reporting(mut self, url: &str, timeout_secs: u64) -> Result<Self, String> {
        let url = url.trim();
        if !url.is_empty() {
            self.reporter = Some(TamperReporter {
                http: HttpClient::with_timeout_secs(timeout_secs)?,
                url: url.to_string(),
            });
        }
        Ok(self)
    }

    pub fn baseline(&self) -> &IntegrityBaseline {
        &self.baseline
    }

    /// Compare every baseline entry against the file on disk
    ///
    /// Stops at the first mismatch.
    pub async fn check_integrity(&self) -> bool {
        if self.baseline.is_empty() {
            logger::debug(LogTag::Integrity, "Empty baseline, nothing to verify");
            return true;
        }

        for (entry, expected) in &self.baseline.files {
            let (root, name, digest) = (self.root.clone(), entry.clone(), expected.clone());
            let status =
                match tokio::task::spawn_blocking(move || check_entry(&root, &name, &digest)).await
                {
                    Ok(status) => status,
                    Err(e) => EntryStatus::Changed {
                        found: format!("unreadable ({})", e),
                    },
                };

            match status {
                EntryStatus::Match => {
                    logger::verbose(LogTag::Integrity, &format!("Verified: {}", entry));
                }
                EntryStatus::Missing => {
                    logger::debug(
                        LogTag::Integrity,
                        &format!("Skipping missing file: {}", entry),
                    );
                }
                EntryStatus::Changed { found } => {
                    logger::error(
                        LogTag::Integrity,
                        &format!(
                            "TAMPERING DETECTED: {}\n  Expected: {}\n  Found: {}",
                            entry, expected, found
                        ),
                    );
                    self.report_tampering(entry).await;
                    return false;
                }
            }
        }

        logger::info(
            LogTag::Integrity,
            &format!("Integrity verified ({} files)", self.baseline.files.len()),
        );
        true
    }

    async fn report_tampering(&self, entry: &str) {
        let reporter = match &self.reporter {
            Some(reporter) => reporter,
            None => return,
        };

        let report = TamperReport {
            event: "tampering",
            file: entry,
            bot_id: &self.bot_id,
            timestamp: Utc::now().to_rfc3339(),
        };

        if !reporter.http.post_json_best_effort(&reporter.url, &report).await {
            logger::debug(LogTag::Integrity, "Tamper report was not delivered");
        }
    }
}

/// Load the baseline, treating an absent manifest as an empty one
pub fn load_baseline_or_empty(path: &Path) -> Result<IntegrityBaseline, ManifestError> {
    match IntegrityBaseline::load(path) {
        Ok(baseline) => {
            logger::debug(
                LogTag::Integrity,
                &format!(
                    "Loaded manifest {} ({} files)",
                    path.display(),
                    baseline.files.len()
                ),
            );
            Ok(baseline)
        }
        Err(ManifestError::NotFound(_)) => {
            logger::warning(
                LogTag::Integrity,
                &format!(
                    "No integrity manifest at {}, file verification disabled",
                    path.display()
                ),
            );
            Ok(IntegrityBaseline::default())
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_server;
    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::sync::Arc;

    const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

    fn install_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bot.bin"), b"hello").unwrap();
        dir
    }

    fn baseline(entries: &[(&str, &str)]) -> IntegrityBaseline {
        IntegrityBaseline {
            version: MANIFEST_VERSION,
            files: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_hash_file() {
        let dir = install_dir();
        assert_eq!(hash_file(&dir.path().join("bot.bin")).unwrap(), HELLO_SHA256);
    }

    #[test]
    fn test_hash_spans_multiple_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let data = vec![7u8; HASH_CHUNK_SIZE * 3 + 11];
        std::fs::write(dir.path().join("big"), &data).unwrap();
        let expected = format!("{:x}", Sha256::digest(&data));
        assert_eq!(hash_file(&dir.path().join("big")).unwrap(), expected);
    }

    #[tokio::test]
    async fn test_missing_file_passes() {
        let dir = install_dir();
        let checker = IntegrityChecker::new(
            dir.path().to_path_buf(),
            baseline(&[("not-shipped.py", "deadbeef")]),
            "bot",
        );
        assert!(checker.check_integrity().await);
    }

    #[tokio::test]
    async fn test_matching_file_passes() {
        let dir = install_dir();
        let checker = IntegrityChecker::new(
            dir.path().to_path_buf(),
            baseline(&[("bot.bin", HELLO_SHA256)]),
            "bot",
        );
        assert!(checker.check_integrity().await);
    }

    #[tokio::test]
    async fn test_unreadable_file_is_mismatch() {
        let dir = install_dir();
        std::fs::create_dir(dir.path().join("actually-a-dir")).unwrap();
        let checker = IntegrityChecker::new(
            dir.path().to_path_buf(),
            baseline(&[("actually-a-dir", HELLO_SHA256)]),
            "bot",
        );
        assert!(!checker.check_integrity().await);
    }

    #[tokio::test]
    async fn test_mismatch_is_reported() {
        let seen: Arc<parking_lot::Mutex<Vec<Value>>> = Arc::default();
        let router = Router::new()
            .route(
                "/alert",
                post(
                    |State(seen): State<Arc<parking_lot::Mutex<Vec<Value>>>>,
                     Json(body): Json<Value>| async move {
                        seen.lock().push(body);
                        StatusCode::OK
                    },
                ),
            )
            .with_state(seen.clone());
        let base = spawn_server(router).await;

        let dir = install_dir();
        let checker = IntegrityChecker::new(
            dir.path().to_path_buf(),
            baseline(&[("bot.bin", "0000")]),
            "BOT-1",
        )
        .with_reporting(&format!("{}/alert", base), 5)
        .unwrap();

        assert!(!checker.check_integrity().await);

        let reports = seen.lock().clone();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0]["event"], json!("tampering"));
        assert_eq!(reports[0]["file"], json!("bot.bin"));
        assert_eq!(reports[0]["bot_id"], json!("BOT-1"));
    }

    #[tokio::test]
    async fn test_mismatch_with_unreachable_monitor_still_fails() {
        let dir = install_dir();
        let checker = IntegrityChecker::new(
            dir.path().to_path_buf(),
            baseline(&[("bot.bin", "0000")]),
            "bot",
        )
        .with_reporting("http://127.0.0.1:1/alert", 1)
        .unwrap();
        assert!(!checker.check_integrity().await);
    }

    #[test]
    fn test_verify_baseline_reports_each_entry() {
        let dir = install_dir();
        std::fs::write(dir.path().join("config.toml"), b"patched").unwrap();
        let statuses = verify_baseline(
            dir.path(),
            &baseline(&[
                ("bot.bin", HELLO_SHA256),
                ("config.toml", HELLO_SHA256),
                ("not-shipped.py", HELLO_SHA256),
            ]),
        );

        assert_eq!(statuses.len(), 3);
        assert_eq!(statuses[0], ("bot.bin".to_string(), EntryStatus::Match));
        assert!(matches!(statuses[1].1, EntryStatus::Changed { .. }));
        assert_eq!(
            statuses[2],
            ("not-shipped.py".to_string(), EntryStatus::Missing)
        );
    }

    #[test]
    fn test_generate_save_load() {
        let dir = install_dir();
        let generated = generate_manifest(dir.path(), &["bot.bin".to_string()]).unwrap();
        assert_eq!(generated.files["bot.bin"], HELLO_SHA256);

        let manifest_path = dir.path().join("integrity.json");
        generated.save(&manifest_path).unwrap();
        assert_eq!(IntegrityBaseline::load(&manifest_path).unwrap(), generated);
    }

    #[test]
    fn test_manifest_validation() {
        assert!(matches!(
            IntegrityBaseline::from_json(r#"{"version": 2, "files": {}}"#),
            Err(ManifestError::UnsupportedVersion(2))
        ));
        assert!(matches!(
            IntegrityBaseline::from_json(r#"{"version": 1, "files": {"../etc/passwd": "x"}}"#),
            Err(ManifestError::InvalidEntry(_))
        ));
        assert!(matches!(
            IntegrityBaseline::from_json("not json"),
            Err(ManifestError::Parse(_))
        ));
    }

    #[test]
    fn test_absent_manifest_is_empty_baseline() {
        let dir = tempfile::tempdir().unwrap();
        let baseline = load_baseline_or_empty(&dir.path().join("missing.json")).unwrap();
        assert!(baseline.is_empty());
    }
}
