/// Startup and security error types
///
/// Every variant here is fatal: the controller logs it, alerts the owner,
/// redacts secrets, and `main` exits with [`StartupError::exit_code`].
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StartupError {
    #[error("Missing required configuration: {}", missing.join(", "))]
    Environment { missing: Vec<String> },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Integrity check failed")]
    Integrity,

    #[error("License is not valid ({status})")]
    License { status: String },

    #[error("Deployment host '{host}' is not allowed")]
    DisallowedEnvironment { host: String },

    #[error("Runtime tamper heuristic '{heuristic}' triggered")]
    TamperDetected { heuristic: String },
}

impl StartupError {
    /// Process exit status for this failure
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// Security failures trigger the alert and redaction path
    pub fn is_security_failure(&self) -> bool {
        matches!(
            self,
            StartupError::Integrity
                | StartupError::License { .. }
                | StartupError::DisallowedEnvironment { .. }
                | StartupError::TamperDetected { .. }
        )
    }
}
