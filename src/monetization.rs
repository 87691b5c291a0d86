/// Static subscription tier messaging
///
/// Everyone is on the free tier. Nothing is enforced or counted; the values
/// only feed the welcome text and the `/premium` screen.

pub const FREE_DAILY_QUERIES: u32 = 10;
pub const PREMIUM_MONTHLY_PRICE: f64 = 9.99;
pub const UPGRADE_URL: &str = "https://your-payment-link.com/nft-bot-premium";

pub const PREMIUM_FEATURES: [&str; 8] = [
    "Unlimited collection tracking",
    "Real-time alerts",
    "Advanced analytics",
    "Portfolio tracking",
    "Custom watchlists",
    "Historical data",
    "API access",
    "Priority support",
];

#[derive(Debug, Clone, PartialEq)]
pub struct UserTier {
    pub tier: String,
    pub remaining_queries: u32,
    pub upgrade_url: String,
}

pub fn check_user_tier(_chat_id: i64) -> UserTier {
    UserTier {
        tier: "free".to_string(),
        remaining_queries: FREE_DAILY_QUERIES,
        upgrade_url: UPGRADE_URL.to_string(),
    }
}

/// HTML body of the `/premium` screen
pub fn upgrade_message(tracked_collections: usize) -> String {
    let features: Vec<String> = PREMIUM_FEATURES
        .iter()
        .map(|f| format!("✅ {}", f))
        .collect();

    format!(
        "🌟 <b>NFT Analytics Bot Premium</b>\n\n\
         💰 <i>Only ${:.2}/month</i>\n\n\
         {}\n\n\
         🚀 <b>Perfect for:</b>\n\
         • NFT Traders\n\
         • Collection Managers\n\
         • Investors\n\
         • Researchers\n\n\
         🔗 Upgrade: {}\n\n\
         📊 <i>Currently tracking {}+ top collections!</i>",
        PREMIUM_MONTHLY_PRICE,
        features.join("\n"),
        UPGRADE_URL,
        tracked_collections
    )
}
