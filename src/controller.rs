//! Bot controller: startup protection checks, dispatcher lifecycle and the
//! hourly license re-check
//!
//! Startup order (first failure wins):
//! 1. required secrets present
//! 2. shipped files match the integrity baseline
//! 3. license valid (online, else offline grace)
//! 4. deployment host on the allowlist
//! 5. runtime tamper heuristic quiet
//!
//! Any failure is logged, sent to the owner chat, and followed by
//! redaction of the secret store before the error is returned to `main`.

use crate::apis::OpenSeaClient;
use crate::config::Config;
use crate::errors::StartupError;
use crate::license::LicenseValidator;
use crate::logger::{self, LogTag};
use crate::paths;
use crate::protection::integrity::{load_baseline_or_empty, IntegrityChecker};
use crate::protection::{
    heuristic_from_name, is_allowed_host, AlertSink, NoopAlertSink, ProtectionMonitor, SecretKey,
    SecretStore, TamperHeuristic, TelegramAlertSink,
};
use crate::telegram::{run_dispatcher, AppContext};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use teloxide::Bot;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

pub struct BotController {
    config: Config,
    secrets: Arc<SecretStore>,
    monitor: Arc<ProtectionMonitor>,
    integrity: IntegrityChecker,
    license: Arc<LicenseValidator>,
    heuristic: Box<dyn TamperHeuristic>,
    alerts: Box<dyn AlertSink>,
    handlers_registered: AtomicBool,
    shutdown: Arc<Notify>,
}

impl BotController {
    /// Build every component from configuration and the secret store
    pub fn new(config: Config, secrets: Arc<SecretStore>) -> Result<Self, StartupError> {
        let license = LicenseValidator::new(secrets.get(SecretKey::LicenseKey), &config.license)
            .map_err(StartupError::Config)?;

        let protection = &config.protection;
        let manifest_path = if protection.integrity_manifest.trim().is_empty() {
            paths::get_integrity_manifest_path()
        } else {
            PathBuf::from(protection.integrity_manifest.trim())
        };
        let root = if protection.integrity_root.trim().is_empty() {
            paths::get_install_root()
        } else {
            PathBuf::from(protection.integrity_root.trim())
        };
        let baseline = load_baseline_or_empty(&manifest_path)
            .map_err(|e| StartupError::Config(format!("integrity manifest: {}", e)))?;
        let integrity = IntegrityChecker::new(root, baseline, license.fingerprint())
            .with_reporting(&protection.monitoring_url, protection.report_timeout_secs)
            .map_err(StartupError::Config)?;

        let heuristic =
            heuristic_from_name(&protection.tamper_heuristic).map_err(StartupError::Config)?;

        let alerts: Box<dyn AlertSink> = match secrets.get(SecretKey::TelegramToken) {
            Some(token) if !config.telegram.owner_chat_id.trim().is_empty() => Box::new(
                TelegramAlertSink::new(&token, &config.telegram.owner_chat_id),
            ),
            _ => Box::new(NoopAlertSink),
        };

        Ok(Self {
            monitor: Arc::new(ProtectionMonitor::new(protection)),
            integrity,
            license: Arc::new(license),
            heuristic,
            alerts,
            secrets,
            config,
            handlers_registered: AtomicBool::new(false),
            shutdown: Arc::new(Notify::new()),
        })
    }

    pub fn with_alert_sink(mut self, alerts: Box<dyn AlertSink>) -> Self {
        self.alerts = alerts;
        self
    }

    pub fn with_heuristic(mut self, heuristic: Box<dyn TamperHeuristic>) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_integrity(mut self, integrity: IntegrityChecker) -> Self {
        self.integrity = integrity;
        self
    }

    pub fn handlers_registered(&self) -> bool {
        self.handlers_registered.load(Ordering::SeqCst)
    }

    pub fn monitor(&self) -> &ProtectionMonitor {
        &self.monitor
    }

    /// Run every startup check in order
    pub async fn startup_checks(&self) -> Result<(), StartupError> {
        if !self.monitor.validate_environment(&self.secrets) {
            let missing = self
                .secrets
                .missing_required()
                .into_iter()
                .map(String::from)
                .collect();
            return Err(self.fail(StartupError::Environment { missing }).await);
        }

        if !self.integrity.check_integrity().await {
            return Err(self.fail(StartupError::Integrity).await);
        }

        let status = self.license.check().await;
        if !status.is_valid() {
            return Err(self
                .fail(StartupError::License {
                    status: status.to_string(),
                })
                .await);
        }

        let protection = &self.config.protection;
        if protection.environment_check_enabled
            && !is_allowed_host(&protection.public_domain, &protection.allowed_domains)
        {
            return Err(self
                .fail(StartupError::DisallowedEnvironment {
                    host: protection.public_domain.clone(),
                })
                .await);
        }

        if self.heuristic.detect() {
            return Err(self
                .fail(StartupError::TamperDetected {
                    heuristic: self.heuristic.name().to_string(),
                })
                .await);
        }

        logger::info(LogTag::Protection, "All startup checks passed");
        Ok(())
    }

    async fn fail(&self, error: StartupError) -> StartupError {
        logger::error(
            LogTag::Protection,
            &format!("SECURITY CHECK FAILED - {}", error),
        );

        let message = if error.is_security_failure() {
            format!("Security breach detected!\n\n{}", error)
        } else {
            format!("Startup aborted.\n\n{}", error)
        };
        if !self.alerts.send_alert(&message).await {
            logger::debug(LogTag::Protection, "Owner alert not delivered");
        }

        self.secrets.redact_all();
        self.license.redact();
        self.alerts.forget_credentials();
        logger::warning(LogTag::Protection, "Secrets redacted");
        error
    }

    /// Check, then serve Telegram updates until Ctrl-C
    pub async fn run(&self) -> Result<(), StartupError> {
        self.monitor.log_startup();
        self.startup_checks().await?;

        let token = self.required_secret(SecretKey::TelegramToken)?;
        let api_key = self.required_secret(SecretKey::MarketplaceApiKey)?;

        let marketplace = &self.config.marketplace;
        let stats = OpenSeaClient::new(&marketplace.api_base_url, &api_key, marketplace.timeout_secs)
            .map_err(StartupError::Config)?;
        let ctx = Arc::new(AppContext::new(
            stats,
            self.monitor.clone(),
            &marketplace.web_url,
        ));

        self.handlers_registered.store(true, Ordering::SeqCst);
        let recheck = spawn_license_recheck(
            self.license.clone(),
            Duration::from_secs(self.config.license.recheck_interval_secs.max(1)),
            self.shutdown.clone(),
            exit_on_invalid_license,
        );

        run_dispatcher(Bot::new(token), ctx).await;

        self.shutdown.notify_one();
        if let Err(e) = recheck.await {
            logger::warning(LogTag::License, &format!("Re-check task ended abnormally: {}", e));
        }
        self.secrets.clear();
        self.license.redact();
        logger::info(LogTag::System, "Shutdown complete");
        Ok(())
    }

    fn required_secret(&self, key: SecretKey) -> Result<String, StartupError> {
        self.secrets
            .get(key)
            .ok_or_else(|| StartupError::Environment {
                missing: vec![key.name().to_string()],
            })
    }
}

fn exit_on_invalid_license() {
    logger::error(LogTag::License, "License invalid - shutting down");
    logger::flush();
    std::process::exit(1);
}

/// Re-validate the license every `period` until `shutdown` is notified
///
/// The first check happens one full period after start. On an invalid
/// license `on_invalid` runs and the loop ends; otherwise a heartbeat is
/// sent.
pub fn spawn_license_recheck<F>(
    license: Arc<LicenseValidator>,
    period: Duration,
    shutdown: Arc<Notify>,
    on_invalid: F,
) -> JoinHandle<()>
where
    F: Fn() + Send + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        loop {
            tokio::select! {
                _ = shutdown.notified() => {
                    logger::debug(LogTag::License, "License re-check stopped");
                    break;
                }
                _ = ticker.tick() => {
                    if !license.is_valid().await {
                        on_invalid();
                        break;
                    }
                    license.heartbeat().await;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LicenseConfig;
    use crate::constants::REDACTED;
    use crate::protection::heuristics::DisabledHeuristic;
    use crate::test_support::{lookup_from, RecordingAlertSink};
    use std::sync::atomic::AtomicUsize;

    struct AlwaysDetect;

    impl TamperHeuristic for AlwaysDetect {
        fn name(&self) -> &'static str {
            "always"
        }

        fn detect(&self) -> bool {
            true
        }
    }

    fn test_config() -> Config {
        let mut config = Config::default();
        config.protection.integrity_manifest = "/nonexistent/nftbot/integrity.json".to_string();
        config.protection.public_domain = "nft-bot.up.railway.app".to_string();
        config.protection.tamper_heuristic = "disabled".to_string();
        config
    }

    fn full_secrets() -> Arc<SecretStore> {
        Arc::new(SecretStore::from_lookup(lookup_from(&[
            ("TELEGRAM_TOKEN", "123:abc"),
            ("OPENSEA_API_KEY", "key"),
            ("LICENSE_KEY", "LIC"),
        ])))
    }

    fn controller(config: Config, secrets: Arc<SecretStore>) -> (BotController, RecordingAlertSink) {
        let sink = RecordingAlertSink::default();
        let controller = BotController::new(config, secrets)
            .unwrap()
            .with_alert_sink(Box::new(sink.clone()));
        (controller, sink)
    }

    #[tokio::test]
    async fn test_missing_api_key_aborts_before_handlers() {
        let secrets = Arc::new(SecretStore::from_lookup(lookup_from(&[
            ("TELEGRAM_TOKEN", "123:abc"),
            ("LICENSE_KEY", "LIC"),
        ])));
        let (controller, sink) = controller(test_config(), secrets.clone());

        let err = controller.run().await.unwrap_err();
        assert_eq!(
            err,
            StartupError::Environment {
                missing: vec!["OPENSEA_API_KEY".to_string()]
            }
        );
        assert_eq!(err.exit_code(), 1);
        assert!(!controller.handlers_registered());
        assert_eq!(secrets.get(SecretKey::TelegramToken).as_deref(), Some(REDACTED));
        assert_eq!(sink.messages().len(), 1);
    }

    #[tokio::test]
    async fn test_all_checks_pass_offline() {
        // no license server: offline grace with no install time
        let secrets = full_secrets();
        let (controller, sink) = controller(test_config(), secrets.clone());

        assert_eq!(controller.startup_checks().await, Ok(()));
        assert!(sink.messages().is_empty());
        assert_eq!(secrets.get(SecretKey::LicenseKey).as_deref(), Some("LIC"));
    }

    #[tokio::test]
    async fn test_missing_license_key_fails() {
        let secrets = Arc::new(SecretStore::from_lookup(lookup_from(&[
            ("TELEGRAM_TOKEN", "123:abc"),
            ("OPENSEA_API_KEY", "key"),
        ])));
        let (controller, sink) = controller(test_config(), secrets.clone());

        let err = controller.startup_checks().await.unwrap_err();
        assert_eq!(
            err,
            StartupError::License {
                status: "online-invalid".to_string()
            }
        );
        assert!(secrets.is_redacted());
        assert!(sink.messages()[0].starts_with("Security breach detected!"));
    }

    #[tokio::test]
    async fn test_disallowed_host_fails() {
        let mut config = test_config();
        config.protection.public_domain = "pirate.example.com".to_string();
        let secrets = full_secrets();
        let (controller, _sink) = controller(config, secrets.clone());

        let err = controller.startup_checks().await.unwrap_err();
        assert_eq!(
            err,
            StartupError::DisallowedEnvironment {
                host: "pirate.example.com".to_string()
            }
        );
        assert!(secrets.is_redacted());
        assert_eq!(controller.license.state().license_key, None);
    }

    #[tokio::test]
    async fn test_host_check_can_be_disabled() {
        let mut config = test_config();
        config.protection.public_domain = String::new();
        config.protection.environment_check_enabled = false;
        let (controller, _sink) = controller(config, full_secrets());
        assert!(controller.startup_checks().await.is_ok());
    }

    #[tokio::test]
    async fn test_tamper_heuristic_fails() {
        let (controller, _sink) = controller(test_config(), full_secrets());
        let controller = controller.with_heuristic(Box::new(AlwaysDetect));

        let err = controller.startup_checks().await.unwrap_err();
        assert_eq!(
            err,
            StartupError::TamperDetected {
                heuristic: "always".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_integrity_failure_comes_before_license() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bot.bin"), b"patched").unwrap();
        let mut baseline = crate::protection::IntegrityBaseline::default();
        baseline.files.insert("bot.bin".to_string(), "00".to_string());

        let secrets = Arc::new(SecretStore::from_lookup(lookup_from(&[
            ("TELEGRAM_TOKEN", "123:abc"),
            ("OPENSEA_API_KEY", "key"),
        ])));
        let (controller, _sink) = controller(test_config(), secrets);
        let controller = controller
            .with_integrity(IntegrityChecker::new(dir.path().to_path_buf(), baseline, "bot"))
            .with_heuristic(Box::new(DisabledHeuristic));

        assert_eq!(controller.startup_checks().await, Err(StartupError::Integrity));
    }

    #[tokio::test]
    async fn test_unknown_heuristic_is_config_error() {
        let mut config = test_config();
        config.protection.tamper_heuristic = "crystal-ball".to_string();
        assert!(matches!(
            BotController::new(config, full_secrets()),
            Err(StartupError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_recheck_stops_on_invalid_license() {
        let license = Arc::new(LicenseValidator::new(None, &LicenseConfig::default()).unwrap());
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let handle = spawn_license_recheck(
            license,
            Duration::from_millis(20),
            Arc::new(Notify::new()),
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
            },
        );

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_recheck_cancellation() {
        let license = Arc::new(
            LicenseValidator::new(Some("LIC".to_string()), &LicenseConfig::default()).unwrap(),
        );
        let shutdown = Arc::new(Notify::new());
        let handle = spawn_license_recheck(
            license,
            Duration::from_secs(3600),
            shutdown.clone(),
            || panic!("license should not be re-checked"),
        );

        shutdown.notify_one();
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .unwrap()
            .unwrap();
    }
}
