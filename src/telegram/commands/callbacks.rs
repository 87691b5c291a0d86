//! Callback query routing for inline keyboard buttons
use super::{menu, stats, Reply};
use crate::collections::normalize_slug;
use crate::logger::{self, LogTag};
use crate::telegram::context::AppContext;
use crate::telegram::formatters::MetricKind;

#[derive(Debug, Clone, PartialEq)]
pub enum CallbackAction {
    MainMenu,
    Collections,
    Premium,
    Info,
    Ask(MetricKind),
    Collection(String),
    Metric(MetricKind, String),
}

impl CallbackAction {
    pub fn parse(data: &str) -> Option<CallbackAction> {
        let parts: Vec<&str> = data.splitn(3, ':').collect();
        match parts.as_slice() {
            ["menu", "main"] | ["menu", "help"] => Some(CallbackAction::MainMenu),
            ["menu", "collections"] => Some(CallbackAction::Collections),
            ["menu", "premium"] => Some(CallbackAction::Premium),
            ["menu", "info"] => Some(CallbackAction::Info),
            ["ask", kind] => MetricKind::parse(kind).map(CallbackAction::Ask),
            ["col", slug] => non_empty(slug).map(CallbackAction::Collection),
            ["metric", kind, slug] => {
                let kind = MetricKind::parse(kind)?;
                non_empty(slug).map(|slug| CallbackAction::Metric(kind, slug))
            }
            _ => None,
        }
    }

    /// Metric and slug when the action hits the marketplace
    pub fn metric_request(&self) -> Option<(MetricKind, &str)> {
        match self {
            CallbackAction::Metric(kind, slug) => Some((*kind, slug)),
            _ => None,
        }
    }
}

fn non_empty(slug: &str) -> Option<String> {
    Some(normalize_slug(slug)).filter(|s| !s.is_empty())
}

pub async fn handle_callback(ctx: &AppContext, action: CallbackAction, chat_id: i64) -> Reply {
    logger::debug(
        LogTag::Telegram,
        &format!("Callback {:?} from chat {}", action, chat_id),
    );

    match action {
        CallbackAction::MainMenu => menu::welcome(chat_id),
        CallbackAction::Collections => menu::collections(),
        CallbackAction::Premium => menu::premium(),
        CallbackAction::Info => menu::bot_info(ctx),
        CallbackAction::Ask(kind) => menu::ask(kind),
        CallbackAction::Collection(slug) => menu::collection(&slug),
        CallbackAction::Metric(kind, slug) => stats::metric_reply(ctx, kind, &slug).await,
    }
}
