/// Runtime tamper heuristics
///
/// A heuristic answers one question: is something attached to this process
/// that should not be? Implementations must be cheap and must not fail; if
/// the evidence cannot be read the answer is "not detected".
use std::path::PathBuf;

pub trait TamperHeuristic: Send + Sync {
    fn name(&self) -> &'static str;

    /// True when tampering is detected
    fn detect(&self) -> bool;
}

/// Linux: a non-zero `TracerPid` in `/proc/self/status` means a tracer is attached
pub struct TracerPidHeuristic {
    status_path: PathBuf,
}

impl TracerPidHeuristic {
    pub fn new() -> Self {
        Self::with_status_path("/proc/self/status")
    }

    pub fn with_status_path(path: impl Into<PathBuf>) -> Self {
        Self {
            status_path: path.into(),
        }
    }
}

impl Default for TracerPidHeuristic {
    fn default() -> Self {
        Self::new()
    }
}

impl TamperHeuristic for TracerPidHeuristic {
    fn name(&self) -> &'static str {
        "tracer-pid"
    }

    fn detect(&self) -> bool {
        let contents = match std::fs::read_to_string(&self.status_path) {
            Ok(contents) => contents,
            Err(_) => return false,
        };

        contents
            .lines()
            .find_map(|line| line.strip_prefix("TracerPid:"))
            .and_then(|pid| pid.trim().parse::<u32>().ok())
            .map(|pid| pid != 0)
            .unwrap_or(false)
    }
}

pub struct DisabledHeuristic;

impl TamperHeuristic for DisabledHeuristic {
    fn name(&self) -> &'static str {
        "disabled"
    }

    fn detect(&self) -> bool {
        false
    }
}

/// Resolve a configured heuristic name
pub fn heuristic_from_name(name: &str) -> Result<Box<dyn TamperHeuristic>, String> {
    match name.trim().to_lowercase().as_str() {
        "tracer-pid" | "tracerpid" => Ok(Box::new(TracerPidHeuristic::new())),
        "disabled" | "none" | "off" => Ok(Box::new(DisabledHeuristic)),
        other => Err(format!("Unknown tamper heuristic '{}'", other)),
    }
}
