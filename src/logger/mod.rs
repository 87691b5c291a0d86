//! Structured logging for the NFT stats bot
//!
//! Small tagged logger with:
//! - Standard log levels (Error/Warning/Info/Debug/Verbose)
//! - Per-subsystem debug control via --debug-<tag> flags
//! - Dual output: colored console + file persistence
//!
//! ## Usage
//!
//! ```rust,ignore
//! use nftbot::logger::{self, LogTag};
//!
//! logger::error(LogTag::Api, "Stats request failed");
//! logger::info(LogTag::License, "License validated online");
//! logger::debug(LogTag::Telegram, "Callback: menu:main"); // Only if --debug-telegram
//! ```
//!
//! Call [`init`] once at startup, before the first log line.

mod config;
mod core;
mod file;
mod format;
mod levels;
mod tags;

pub use config::{get_logger_config, init_from_args, set_logger_config, LoggerConfig};
pub use levels::LogLevel;
pub use tags::LogTag;

/// Initialize the logger system
///
/// Parses command-line flags into the logger configuration and opens the
/// log file. Logging before `init` still works but only reaches the console.
pub fn init() {
    config::init_from_args();
    file::init_file_logging();
}

/// Log at ERROR level (always shown)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level
///
/// Only shown when `--debug-<tag>` (or `--debug-all`) is provided.
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level, shown only with `--verbose` or `--verbose-<tag>`
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}

/// Force flush all pending log writes
///
/// Call this during shutdown, and before any forced process exit.
pub fn flush() {
    file::flush_file_logging();
}
