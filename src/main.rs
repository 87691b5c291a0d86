use nftbot::{
    arguments::{get_config_path_override, is_check_only_enabled, is_help_requested, print_debug_info, print_help},
    config,
    controller::BotController,
    logger::{self, LogTag},
    protection::SecretStore,
};
use std::sync::Arc;

/// Main entry point for the NFT stats bot
///
/// - `--help`: print usage and exit
/// - `--check-only`: run the startup protection checks and exit
/// - default: run the checks, then serve Telegram updates until Ctrl-C
///
/// Exit status is 0 on a clean shutdown and 1 when any startup check fails.
#[tokio::main]
async fn main() {
    if is_help_requested() {
        print_help();
        std::process::exit(0);
    }

    // .env is optional; real environment variables take precedence
    dotenv::dotenv().ok();

    // Logger needs the logs directory before it opens its file
    if let Err(e) = nftbot::paths::ensure_all_directories() {
        eprintln!("❌ Failed to create required directories: {}", e);
        std::process::exit(1);
    }

    logger::init();
    logger::info(LogTag::System, "🤖 NFT Analytics Bot starting...");
    print_debug_info();

    if let Err(e) = config::load_config(get_config_path_override().as_deref()) {
        logger::error(LogTag::Config, &format!("❌ {}", e));
        logger::flush();
        std::process::exit(1);
    }

    let secrets = Arc::new(SecretStore::from_env());
    let controller = match BotController::new(config::get_config_clone(), secrets) {
        Ok(controller) => controller,
        Err(e) => {
            logger::error(LogTag::System, &format!("❌ {}", e));
            logger::flush();
            std::process::exit(e.exit_code());
        }
    };

    let result = if is_check_only_enabled() {
        logger::info(LogTag::System, "Check-only mode");
        controller.startup_checks().await
    } else {
        controller.run().await
    };

    match result {
        Ok(()) => {
            logger::info(LogTag::System, "✅ Exiting normally");
            logger::flush();
        }
        Err(e) => {
            logger::error(LogTag::System, &format!("❌ Startup failed: {}", e));
            logger::flush();
            std::process::exit(e.exit_code());
        }
    }
}
