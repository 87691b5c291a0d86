//! Collection metric replies
use super::Reply;
use crate::collections::display_name;
use crate::logger::{self, LogTag};
use crate::telegram::context::AppContext;
use crate::telegram::formatters::{format_loading, format_metric, format_unavailable, MetricKind};
use crate::telegram::keyboards;

/// Placeholder shown while the marketplace request is in flight
pub fn loading_reply(kind: MetricKind, slug: &str) -> Reply {
    Reply::text(format_loading(kind, display_name(slug)))
}

/// Fetch stats and render one metric view
///
/// Any failure renders the "could not fetch" text; the options keyboard is
/// attached either way so the user can retry.
pub async fn metric_reply(ctx: &AppContext, kind: MetricKind, slug: &str) -> Reply {
    let name = display_name(slug);
    let keyboard = keyboards::collection_options(slug);

    match ctx.stats.fetch_stats(slug).await {
        Ok(stats) => Reply::new(
            format_metric(kind, name, &stats, &ctx.collection_url(slug)),
            keyboard,
        ),
        Err(e) => {
            logger::debug(
                LogTag::Telegram,
                &format!("No {} for {}: {}", kind.as_str(), slug, e),
            );
            Reply::new(format_unavailable(kind, name), keyboard)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{spawn_stats_server, test_context};

    #[tokio::test]
    async fn test_each_metric_renders() {
        let ctx = test_context(&spawn_stats_server().await);
        let sales = metric_reply(&ctx, MetricKind::Sales, "boredapeyachtclub").await;
        assert!(sales.text.contains("Total Sales: <b>10.00</b>"));

        let volume = metric_reply(&ctx, MetricKind::Volume, "boredapeyachtclub").await;
        assert!(volume.text.contains("Total Volume: <b>500.00 ETH</b>"));

        let complete = metric_reply(&ctx, MetricKind::Stats, "boredapeyachtclub").await;
        assert!(complete.text.contains("Complete Stats"));
        assert!(complete
            .text
            .contains("href=\"https://opensea.io/collection/boredapeyachtclub\""));
    }

    #[tokio::test]
    async fn test_unknown_collection_offers_retry() {
        let ctx = test_context(&spawn_stats_server().await);
        let reply = metric_reply(&ctx, MetricKind::Floor, "no-such-collection").await;
        assert_eq!(
            reply.text,
            "❌ Could not fetch floor for no-such-collection.\n\nPlease try another collection."
        );
        assert_eq!(
            reply.keyboard,
            Some(keyboards::collection_options("no-such-collection"))
        );
    }

    #[test]
    fn test_loading_uses_display_name() {
        assert_eq!(
            loading_reply(MetricKind::Floor, "azuki").text,
            "🔄 Fetching floor for Azuki..."
        );
    }
}
