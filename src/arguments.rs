/// Command-line argument handling for the bot binary
///
/// The bot is configured through the environment; flags only control
/// logging and a few run modes:
/// - `--help`, `-h`: print usage
/// - `--config <path>`: optional TOML file with non-secret settings
/// - `--check-only`: run startup checks and exit
/// - `--debug-<tag>`, `--verbose`, `--quiet`: see the logger module
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::env;

/// Global command-line arguments storage
pub static CMD_ARGS: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(env::args().collect()));

/// Sets the global command-line arguments
/// Used by binaries and tests to override the default env::args() collection
pub fn set_cmd_args(args: Vec<String>) {
    *CMD_ARGS.lock() = args;
}

/// Gets a copy of the current command-line arguments
pub fn get_cmd_args() -> Vec<String> {
    CMD_ARGS.lock().clone()
}

/// Checks if a specific argument is present in the command line
pub fn has_arg(arg: &str) -> bool {
    get_cmd_args().iter().any(|a| a == arg)
}

/// Gets the value of a command-line argument that follows a flag
/// Returns None if the flag is not found or has no value
pub fn get_arg_value(flag: &str) -> Option<String> {
    let args = get_cmd_args();
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

pub fn is_help_requested() -> bool {
    has_arg("--help") || has_arg("-h")
}

pub fn is_check_only_enabled() -> bool {
    has_arg("--check-only")
}

pub fn get_config_path_override() -> Option<String> {
    get_arg_value("--config")
}

/// Print debug information about enabled modes
pub fn print_debug_info() {
    let debug_flags: Vec<String> = get_cmd_args()
        .into_iter()
        .filter(|a| a.starts_with("--debug-") || a.starts_with("--verbose"))
        .collect();

    if !debug_flags.is_empty() {
        crate::logger::info(
            crate::logger::LogTag::System,
            &format!("Debug modes enabled: {}", debug_flags.join(", ")),
        );
    }
}

pub fn print_help() {
    println!("nftbot - Telegram bot for NFT collection statistics");
    println!();
    println!("USAGE:");
    println!("    nftbot [FLAGS]");
    println!();
    println!("CORE FLAGS:");
    println!("    --help, -h                Show this help message");
    println!("    --config <path>           Load non-secret settings from a TOML file");
    println!("    --check-only              Run startup protection checks and exit");
    println!();
    println!("DEBUG FLAGS:");
    println!("    --debug-api               Marketplace API debug mode");
    println!("    --debug-license           License validation debug mode");
    println!("    --debug-integrity         Integrity checker debug mode");
    println!("    --debug-protect           Protection checks debug mode");
    println!("    --debug-telegram          Telegram dispatcher debug mode");
    println!("    --debug-all               Enable every debug mode");
    println!("    --verbose                 Very detailed output");
    println!("    --quiet                   Errors only");
    println!("    --no-log-file             Console logging only");
    println!();
    println!("ENVIRONMENT:");
    println!("    TELEGRAM_TOKEN            Bot token from @BotFather (required)");
    println!("    OPENSEA_API_KEY           Marketplace API key (required)");
    println!("    LICENSE_KEY               License key");
    println!("    BOT_ID                    Fingerprint override");
    println!("    INSTALL_TIME              Install time, unix seconds");
    println!("    OWNER_TELEGRAM_ID         Chat that receives security alerts");
    println!("    RAILWAY_PUBLIC_DOMAIN     Deployment hostname");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arg_value_lookup() {
        set_cmd_args(vec![
            "nftbot".to_string(),
            "--config".to_string(),
            "bot.toml".to_string(),
            "--check-only".to_string(),
        ]);
        assert_eq!(get_config_path_override().as_deref(), Some("bot.toml"));
        assert!(is_check_only_enabled());
        assert!(!is_help_requested());
        assert_eq!(get_arg_value("--check-only"), None);
    }
}
