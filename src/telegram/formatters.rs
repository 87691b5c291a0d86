//! HTML message formatters
//!
//! Every dynamic value (collection names, slugs, user input) goes through
//! [`html_escape`] before it is placed in a message.

use crate::apis::CollectionStats;
use crate::formatting::format_value;
use serde_json::Value;
use crate::monetization::UserTier;
use crate::protection::{HealthReport, ProtectionSnapshot};

/// Which view of a collection's stats to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Floor,
    Stats,
    Volume,
    Sales,
}

impl MetricKind {
    pub const ALL: [MetricKind; 4] = [
        MetricKind::Floor,
        MetricKind::Stats,
        MetricKind::Volume,
        MetricKind::Sales,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Floor => "floor",
            MetricKind::Stats => "stats",
            MetricKind::Volume => "volume",
            MetricKind::Sales => "sales",
        }
    }

    pub fn parse(s: &str) -> Option<MetricKind> {
        MetricKind::ALL.iter().copied().find(|k| k.as_str() == s)
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            MetricKind::Floor => "🏷",
            MetricKind::Stats => "📊",
            MetricKind::Volume => "📦",
            MetricKind::Sales => "🧾",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MetricKind::Floor => "Floor",
            MetricKind::Stats => "Stats",
            MetricKind::Volume => "Volume",
            MetricKind::Sales => "Sales",
        }
    }

    /// Example slug shown in usage hints
    pub fn example_slug(&self) -> &'static str {
        match self {
            MetricKind::Floor => "boredapeyachtclub",
            MetricKind::Stats => "cryptopunks",
            MetricKind::Volume => "azuki",
            MetricKind::Sales => "doodles-official",
        }
    }
}

/// Escape HTML special characters for Telegram HTML parse mode
pub fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn marketplace_link(url: &str) -> String {
    format!("🔗 <a href=\"{}\">View on OpenSea</a>", html_escape(url))
}

fn stat(value: &Option<Value>) -> String {
    html_escape(&format_value(value.as_ref()))
}

/// Render one metric view of a collection
pub fn format_metric(kind: MetricKind, name: &str, stats: &CollectionStats, url: &str) -> String {
    let name = html_escape(name);
    let cur = html_escape(stats.currency());
    let floor = stat(&stats.floor_price);
    let volume = stat(&stats.volume);
    let sales = stat(&stats.sales);
    let avg = stat(&stats.average_price);

    let body = match kind {
        MetricKind::Floor => format!(
            "🏷 <b>{name}</b>\n\
             Floor Price: <b>{floor} {cur}</b>\n\n\
             📊 Quick Stats:\n\
             • Volume: {volume} {cur}\n\
             • Sales: {sales}\n\
             • Owners: {owners}",
            owners = stat(&stats.num_owners),
        ),
        MetricKind::Stats => format!(
            "📊 <b>{name} - Complete Stats</b>\n\n\
             • Floor Price: {floor} {cur}\n\
             • Total Volume: {volume} {cur}\n\
             • Total Sales: {sales}\n\
             • Average Price: {avg} {cur}\n\
             • Market Cap: {cap} {cur}\n\
             • Num Owners: {owners}\n\
             • Total Supply: {supply}",
            cap = stat(&stats.market_cap),
            owners = stat(&stats.num_owners),
            supply = stat(&stats.total_supply),
        ),
        MetricKind::Volume => format!(
            "📦 <b>{name}</b>\n\
             Total Volume: <b>{volume} {cur}</b>\n\n\
             📈 Other Metrics:\n\
             • Floor: {floor} {cur}\n\
             • Sales: {sales}\n\
             • Avg Price: {avg} {cur}",
        ),
        MetricKind::Sales => format!(
            "🧾 <b>{name}</b>\n\
             Total Sales: <b>{sales}</b>\n\n\
             💰 Trading Stats:\n\
             • Volume: {volume} {cur}\n\
             • Avg Price: {avg} {cur}\n\
             • Floor: {floor} {cur}",
        ),
    };

    format!("{}\n\n{}", body, marketplace_link(url))
}

pub fn format_loading(kind: MetricKind, name: &str) -> String {
    format!("🔄 Fetching {} for {}...", kind.as_str(), html_escape(name))
}

pub fn format_unavailable(kind: MetricKind, name: &str) -> String {
    format!(
        "❌ Could not fetch {} for {}.\n\nPlease try another collection.",
        kind.as_str(),
        html_escape(name)
    )
}

pub fn format_usage(kind: MetricKind) -> String {
    format!(
        "❌ Please provide a collection slug.\n\n\
         Example: <code>/{} {}</code>\n\n\
         Or use the interactive menu below:",
        kind.as_str(),
        kind.example_slug()
    )
}

pub fn format_welcome(tier: &UserTier) -> String {
    format!(
        "👋 <b>Welcome to NFT Analytics Bot!</b>\n\n\
         🎯 <b>How to Use:</b>\n\
         1. Tap '🏆 Popular Collections' to browse\n\
         2. Select a collection\n\
         3. Choose what data you want\n\
         4. View the results instantly!\n\n\
         📊 <b>Your Plan:</b> {}\n\
         Queries remaining today: {}\n\n\
         💡 <b>Commands:</b>\n\
         • /floor &lt;slug&gt; - Get floor price\n\
         • /stats &lt;slug&gt; - Get all stats\n\
         • /volume &lt;slug&gt; - Get trading volume\n\
         • /sales &lt;slug&gt; - Get sales count\n\
         • /search &lt;name&gt; - Search for collections\n\
         • /premium - Upgrade to premium\n\n\
         🔐 <b>Protected by enterprise-grade security</b>",
        html_escape(&tier.tier.to_uppercase()),
        tier.remaining_queries
    )
}

pub fn format_bot_info(
    snapshot: &ProtectionSnapshot,
    health: &HealthReport,
    tracked: usize,
) -> String {
    let protection = if snapshot.is_protected {
        "✅ Active"
    } else {
        "❌ Inactive"
    };

    format!(
        "🤖 <b>NFT Analytics Bot Information</b>\n\n\
         🔐 <b>Protection Status:</b> {}\n\
         💚 <b>Health:</b> {} (checked {})\n\
         ⏰ <b>Uptime:</b> {}\n\
         🌐 <b>Environment:</b> {}\n\
         📊 <b>Collections Tracked:</b> {}\n\n\
         <b>Features:</b>\n\
         • Real-time floor prices\n\
         • Volume tracking\n\
         • Sales analytics\n\
         • {}+ top collections\n\
         • Interactive menus\n\n\
         🔒 <b>Enterprise Protection System Active</b>",
        protection,
        html_escape(&health.status),
        health.timestamp.format("%H:%M:%S UTC"),
        snapshot.uptime_label(),
        html_escape(&snapshot.environment_label),
        tracked,
        tracked
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_stats() -> CollectionStats {
        CollectionStats {
            floor_price: Some(json!(12.3456789)),
            volume: Some(json!(1_234_567.5)),
            sales: Some(json!(10)),
            num_owners: Some(json!(4000)),
            ..CollectionStats::default()
        }
    }

    #[test]
    fn test_floor_view() {
        let text = format_metric(
            MetricKind::Floor,
            "Bored Ape Yacht Club",
            &sample_stats(),
            "https://opensea.io/collection/boredapeyachtclub",
        );
        assert!(text.contains("Floor Price: <b>12.35 ETH</b>"));
        assert!(text.contains("• Volume: 1,234,567.50 ETH"));
        assert!(text.contains("• Owners: 4,000.00"));
        assert!(text.contains("href=\"https://opensea.io/collection/boredapeyachtclub\""));
    }

    #[test]
    fn test_complete_view_shows_missing_fields_as_na() {
        let text = format_metric(MetricKind::Stats, "Azuki", &sample_stats(), "u");
        assert!(text.contains("• Average Price: N/A ETH"));
        assert!(text.contains("• Market Cap: N/A ETH"));
        assert!(text.contains("• Total Supply: N/A"));
    }

    #[test]
    fn test_non_numeric_values_render_literally() {
        let stats: CollectionStats = serde_json::from_value(json!({
            "floor_price": "pending",
            "sales": 10.5,
            "num_owners": -3,
            "volume": "<tbd>"
        }))
        .unwrap();
        let text = format_metric(MetricKind::Floor, "x", &stats, "u");
        assert!(text.contains("Floor Price: <b>pending ETH</b>"));
        assert!(text.contains("• Sales: 10.50"));
        assert!(text.contains("• Owners: -3.00"));
        assert!(text.contains("• Volume: &lt;tbd&gt; ETH"));
    }

    #[test]
    fn test_currency_symbol_from_upstream() {
        let stats = CollectionStats {
            floor_price_symbol: Some("APE".to_string()),
            ..sample_stats()
        };
        let text = format_metric(MetricKind::Volume, "x", &stats, "u");
        assert!(text.contains("Total Volume: <b>1,234,567.50 APE</b>"));
    }

    #[test]
    fn test_names_are_escaped() {
        let text = format_metric(MetricKind::Sales, "<script>&", &sample_stats(), "u");
        assert!(text.contains("<b>&lt;script&gt;&amp;</b>"));
        assert_eq!(
            format_unavailable(MetricKind::Floor, "a<b"),
            "❌ Could not fetch floor for a&lt;b.\n\nPlease try another collection."
        );
    }

    #[test]
    fn test_metric_kind_parse() {
        for kind in MetricKind::ALL {
            assert_eq!(MetricKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(MetricKind::parse("price"), None);
    }

    #[test]
    fn test_usage_mentions_example() {
        assert!(format_usage(MetricKind::Sales).contains("<code>/sales doodles-official</code>"));
    }
}
