//! Menu and informational replies
use super::Reply;
use crate::collections::{self, display_name, POPULAR_COLLECTIONS};
use crate::monetization::{check_user_tier, upgrade_message};
use crate::telegram::context::AppContext;
use crate::telegram::formatters::{
    format_bot_info, format_usage, format_welcome, html_escape, MetricKind,
};
use crate::telegram::keyboards;

pub fn welcome(chat_id: i64) -> Reply {
    let tier = check_user_tier(chat_id);
    Reply::new(format_welcome(&tier), keyboards::main_menu())
}

pub fn usage(kind: MetricKind) -> Reply {
    Reply::new(format_usage(kind), keyboards::main_menu())
}

pub fn collections() -> Reply {
    Reply::new(
        "🏆 <b>Popular NFT Collections</b>\n\nSelect a collection to view its stats:",
        keyboards::collections_menu(None),
    )
}

/// Collection picker for a single metric
pub fn ask(kind: MetricKind) -> Reply {
    let text = match kind {
        MetricKind::Floor => {
            "🏷 <b>Get Floor Price</b>\n\nSelect a collection to view its floor price:"
        }
        MetricKind::Stats => {
            "📊 <b>Get Collection Stats</b>\n\nSelect a collection to view its complete statistics:"
        }
        MetricKind::Volume => {
            "📦 <b>Get Trading Volume</b>\n\nSelect a collection to view its trading volume:"
        }
        MetricKind::Sales => "🧾 <b>Get Sales Count</b>\n\nSelect a collection to view its sales count:",
    };
    Reply::new(text, keyboards::collections_menu(Some(kind)))
}

pub fn collection(slug: &str) -> Reply {
    Reply::new(
        format!(
            "🎯 <b>{}</b>\n\nWhat would you like to see?",
            html_escape(display_name(slug))
        ),
        keyboards::collection_options(slug),
    )
}

pub fn search(term: &str) -> Reply {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return Reply::new(
            "🔍 <b>Search for Collections</b>\n\n\
             Usage: <code>/search &lt;collection name&gt;</code>\n\n\
             Example: <code>/search bored ape</code>",
            keyboards::main_menu(),
        );
    }

    let results = collections::search(&term);
    if results.is_empty() {
        return Reply::new(
            format!(
                "❌ No collections found for '{}'.\n\nTry these popular collections:",
                html_escape(&term)
            ),
            keyboards::collections_menu(None),
        );
    }

    Reply::new(
        format!("🔍 <b>Search Results for '{}':</b>", html_escape(&term)),
        keyboards::search_results(&results),
    )
}

pub fn premium() -> Reply {
    Reply::new(
        upgrade_message(POPULAR_COLLECTIONS.len()),
        keyboards::back_to_main(),
    )
}

pub fn bot_info(ctx: &AppContext) -> Reply {
    Reply::new(
        format_bot_info(
            &ctx.monitor.snapshot(),
            &ctx.monitor.check_health(),
            POPULAR_COLLECTIONS.len(),
        ),
        keyboards::back_to_main(),
    )
}
