//! Inline keyboard builders
//!
//! Callback data layout:
//! - `menu:<main|collections|premium|info|help>`
//! - `ask:<metric>` (collection picker for one metric)
//! - `col:<slug>` (options for one collection)
//! - `metric:<metric>:<slug>`

use super::formatters::MetricKind;
use crate::collections::{display_name, truncate, POPULAR_COLLECTIONS};
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

/// Telegram rejects callback data longer than this many bytes
pub const MAX_CALLBACK_DATA_LEN: usize = 64;

const COLLECTION_BUTTON_CHARS: usize = 15;
const OPTION_NAME_CHARS: usize = 20;

fn btn(text: &str, callback_data: &str) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(text.to_string(), callback_data.to_string())
}

fn back_to_main_row() -> Vec<InlineKeyboardButton> {
    vec![btn("🔙 Back to Main Menu", "menu:main")]
}

pub fn metric_callback(kind: MetricKind, slug: &str) -> String {
    format!("metric:{}:{}", kind.as_str(), slug)
}

pub fn main_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![btn("🏆 Popular Collections", "menu:collections")],
        vec![
            btn("🏷 Get Floor", "ask:floor"),
            btn("📊 Get Stats", "ask:stats"),
        ],
        vec![
            btn("📦 Get Volume", "ask:volume"),
            btn("🧾 Get Sales", "ask:sales"),
        ],
        vec![
            btn("💎 Premium Features", "menu:premium"),
            btn("ℹ️ Bot Info", "menu:info"),
        ],
    ])
}

pub fn back_to_main() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![back_to_main_row()])
}

/// Two buttons per row, then a back button
///
/// With `metric` set, each button jumps straight to that metric; otherwise
/// it opens the collection's options.
fn collection_grid(entries: &[(&str, &str)], metric: Option<MetricKind>) -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = entries
        .chunks(2)
        .map(|chunk| {
            chunk
                .iter()
                .map(|(slug, name)| {
                    let data = match metric {
                        Some(kind) => metric_callback(kind, slug),
                        None => format!("col:{}", slug),
                    };
                    btn(&truncate(name, COLLECTION_BUTTON_CHARS), &data)
                })
                .collect()
        })
        .collect();

    rows.push(back_to_main_row());
    InlineKeyboardMarkup::new(rows)
}

pub fn collections_menu(metric: Option<MetricKind>) -> InlineKeyboardMarkup {
    collection_grid(&POPULAR_COLLECTIONS, metric)
}

pub fn search_results(results: &[(&str, &str)]) -> InlineKeyboardMarkup {
    collection_grid(results, None)
}

/// Metric buttons for one collection plus navigation
///
/// Slugs too long for callback data get navigation only.
pub fn collection_options(slug: &str) -> InlineKeyboardMarkup {
    let name = truncate(display_name(slug), OPTION_NAME_CHARS);
    let metric_btn = |kind: MetricKind| {
        btn(
            &format!("{} {} {}", kind.emoji(), name, kind.label()),
            &metric_callback(kind, slug),
        )
    };

    let mut rows = Vec::new();
    if metric_callback(MetricKind::Volume, slug).len() <= MAX_CALLBACK_DATA_LEN {
        rows.push(vec![metric_btn(MetricKind::Floor), metric_btn(MetricKind::Stats)]);
        rows.push(vec![metric_btn(MetricKind::Volume), metric_btn(MetricKind::Sales)]);
    }
    rows.push(vec![btn("🔙 Back to Collections", "menu:collections")]);
    rows.push(vec![btn("🏠 Main Menu", "menu:main")]);

    InlineKeyboardMarkup::new(rows)
}
