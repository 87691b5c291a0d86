/// Security alerts to the bot owner
///
/// Alerts are best-effort: a sink reports whether delivery succeeded but
/// callers never act on failure.
use crate::constants::REPORT_TIMEOUT_SECS;
use crate::logger::{self, LogTag};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::time::Duration;
use teloxide::prelude::*;
use teloxide::types::ChatId;

#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn send_alert(&self, message: &str) -> bool;

    /// Release any credentials held for delivery; later alerts are dropped
    fn forget_credentials(&self) {}
}

pub fn format_alert(message: &str) -> String {
    format!("🚨 BOT SECURITY ALERT\n\n{}", message)
}

/// Sends alerts to the owner's private chat
pub struct TelegramAlertSink {
    bot: Mutex<Option<Bot>>,
    owner_chat: Option<ChatId>,
}

impl TelegramAlertSink {
    /// `owner_chat_id` is OWNER_TELEGRAM_ID; an empty or non-numeric id disables alerts
    pub fn new(token: &str, owner_chat_id: &str) -> Self {
        let owner_chat = owner_chat_id.trim().parse::<i64>().ok().map(ChatId);
        if owner_chat.is_none() && !owner_chat_id.trim().is_empty() {
            logger::warning(
                LogTag::Protection,
                &format!("Invalid OWNER_TELEGRAM_ID '{}', alerts disabled", owner_chat_id),
            );
        }
        Self {
            bot: Mutex::new(Some(Bot::new(token))),
            owner_chat,
        }
    }
}

#[async_trait]
impl AlertSink for TelegramAlertSink {
    async fn send_alert(&self, message: &str) -> bool {
        let chat = match self.owner_chat {
            Some(chat) => chat,
            None => return false,
        };
        let bot = self.bot.lock().clone();
        let bot = match bot {
            Some(bot) => bot,
            None => return false,
        };

        let send = bot.send_message(chat, format_alert(message));
        match tokio::time::timeout(Duration::from_secs(REPORT_TIMEOUT_SECS), send).await {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                logger::debug(LogTag::Protection, &format!("Alert not delivered: {}", e));
                false
            }
            Err(_) => {
                logger::debug(LogTag::Protection, "Alert timed out");
                false
            }
        }
    }

    fn forget_credentials(&self) {
        self.bot.lock().take();
    }
}

/// Sink used when no owner chat or token is available
pub struct NoopAlertSink;

#[async_trait]
impl AlertSink for NoopAlertSink {
    async fn send_alert(&self, _message: &str) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_text() {
        assert_eq!(
            format_alert("Security breach detected!"),
            "🚨 BOT SECURITY ALERT\n\nSecurity breach detected!"
        );
    }

    #[tokio::test]
    async fn test_sink_without_owner_does_not_send() {
        let sink = TelegramAlertSink::new("123:abc", "");
        assert!(!sink.send_alert("x").await);

        let invalid = TelegramAlertSink::new("123:abc", "not-a-number");
        assert!(!invalid.send_alert("x").await);
    }

    #[tokio::test]
    async fn test_forgotten_credentials_stop_alerts() {
        let sink = TelegramAlertSink::new("123:abc", "42");
        sink.forget_credentials();
        assert!(sink.bot.lock().is_none());
        assert!(!sink.send_alert("x").await);
    }
}
