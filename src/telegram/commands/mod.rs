//! Command handlers
//!
//! Handlers return a [`Reply`] instead of talking to Telegram directly;
//! `telegram::bot` sends or edits messages with it.

pub mod callbacks;
pub mod menu;
pub mod stats;

use super::context::AppContext;
use super::formatters::MetricKind;
use crate::collections::normalize_slug;
use crate::logger::{self, LogTag};
use teloxide::types::InlineKeyboardMarkup;
use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "NFT Analytics Bot commands:")]
pub enum Command {
    #[command(description = "show the main menu")]
    Start,
    #[command(description = "show this help")]
    Help,
    #[command(description = "floor price of a collection")]
    Floor(String),
    #[command(description = "complete stats of a collection")]
    Stats(String),
    #[command(description = "trading volume of a collection")]
    Volume(String),
    #[command(description = "sales count of a collection")]
    Sales(String),
    #[command(description = "search popular collections")]
    Search(String),
    #[command(description = "premium features")]
    Premium,
    #[command(description = "bot information")]
    Info,
}

/// Text plus optional inline keyboard, sent as HTML
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Option<InlineKeyboardMarkup>,
}

impl Reply {
    pub fn new(text: impl Into<String>, keyboard: InlineKeyboardMarkup) -> Self {
        Self {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }
}

/// First whitespace-separated argument as a slug
fn slug_arg(args: &str) -> Option<String> {
    args.split_whitespace()
        .next()
        .map(normalize_slug)
        .filter(|s| !s.is_empty())
}

fn metric_command(cmd: &Command) -> Option<(MetricKind, &str)> {
    match cmd {
        Command::Floor(args) => Some((MetricKind::Floor, args)),
        Command::Stats(args) => Some((MetricKind::Stats, args)),
        Command::Volume(args) => Some((MetricKind::Volume, args)),
        Command::Sales(args) => Some((MetricKind::Sales, args)),
        _ => None,
    }
}

/// Metric and slug for commands that hit the marketplace
pub fn metric_request(cmd: &Command) -> Option<(MetricKind, String)> {
    let (kind, args) = metric_command(cmd)?;
    slug_arg(args).map(|slug| (kind, slug))
}

async fn metric_or_usage(ctx: &AppContext, kind: MetricKind, args: &str) -> Reply {
    match slug_arg(args) {
        Some(slug) => stats::metric_reply(ctx, kind, &slug).await,
        None => menu::usage(kind),
    }
}

pub async fn handle_command(ctx: &AppContext, cmd: Command, chat_id: i64) -> Reply {
    logger::debug(LogTag::Telegram, &format!("Command {:?} from chat {}", cmd, chat_id));

    match cmd {
        Command::Start | Command::Help => menu::welcome(chat_id),
        Command::Floor(args) => metric_or_usage(ctx, MetricKind::Floor, &args).await,
        Command::Stats(args) => metric_or_usage(ctx, MetricKind::Stats, &args).await,
        Command::Volume(args) => metric_or_usage(ctx, MetricKind::Volume, &args).await,
        Command::Sales(args) => metric_or_usage(ctx, MetricKind::Sales, &args).await,
        Command::Search(term) => menu::search(&term),
        Command::Premium => menu::premium(),
        Command::Info => menu::bot_info(ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{spawn_stats_server, test_context};

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            Command::parse("/floor boredapeyachtclub", "nftbot").unwrap(),
            Command::Floor("boredapeyachtclub".to_string())
        );
        assert_eq!(
            Command::parse("/search bored ape", "nftbot").unwrap(),
            Command::Search("bored ape".to_string())
        );
        assert_eq!(Command::parse("/info", "nftbot").unwrap(), Command::Info);
    }

    #[test]
    fn test_metric_request_normalizes_slug() {
        assert_eq!(
            metric_request(&Command::Volume("  Azuki extra ".to_string())),
            Some((MetricKind::Volume, "azuki".to_string()))
        );
        assert_eq!(metric_request(&Command::Sales(String::new())), None);
        assert_eq!(metric_request(&Command::Premium), None);
    }

    #[tokio::test]
    async fn test_floor_command_end_to_end() {
        let ctx = test_context(&spawn_stats_server().await);
        let reply = handle_command(
            &ctx,
            Command::Floor("boredapeyachtclub".to_string()),
            1,
        )
        .await;
        assert!(reply.text.contains("12.35 ETH"), "{}", reply.text);
        assert!(reply.text.contains("Bored Ape Yacht Club"));
        assert!(reply.keyboard.is_some());
    }

    #[tokio::test]
    async fn test_metric_command_without_slug_shows_usage() {
        let ctx = test_context("http://127.0.0.1:1");
        let reply = handle_command(&ctx, Command::Stats("   ".to_string()), 1).await;
        assert!(reply.text.contains("Please provide a collection slug"));
        assert!(reply.text.contains("/stats cryptopunks"));
        assert_eq!(reply.keyboard, Some(crate::telegram::keyboards::main_menu()));
    }

    #[tokio::test]
    async fn test_start_and_help_share_welcome() {
        let ctx = test_context("http://127.0.0.1:1");
        let start = handle_command(&ctx, Command::Start, 7).await;
        let help = handle_command(&ctx, Command::Help, 7).await;
        assert_eq!(start, help);
        assert!(start.text.contains("<b>Your Plan:</b> FREE"));
    }
}
