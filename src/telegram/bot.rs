//! Telegram dispatcher
//!
//! Thin adapter between teloxide updates and the command layer. Commands
//! send a new message; callbacks edit the message their button belongs
//! to. Metric lookups first show a "Fetching..." placeholder and then
//! replace it with the result.

use super::commands::callbacks::{self, CallbackAction};
use super::commands::{self, stats, Command, Reply};
use super::context::AppContext;
use crate::logger::{self, LogTag};
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{ChatId, LinkPreviewOptions, MessageId, ParseMode};
use teloxide::utils::command::BotCommands;
use teloxide::{ApiError, RequestError};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

fn no_link_preview() -> LinkPreviewOptions {
    LinkPreviewOptions {
        is_disabled: true,
        url: None,
        prefer_small_media: false,
        prefer_large_media: false,
        show_above_text: false,
    }
}

async fn send_reply(bot: &Bot, chat: ChatId, reply: Reply) -> Result<Message, RequestError> {
    let mut request = bot
        .send_message(chat, reply.text)
        .parse_mode(ParseMode::Html)
        .link_preview_options(no_link_preview());
    if let Some(keyboard) = reply.keyboard {
        request = request.reply_markup(keyboard);
    }
    request.await
}

async fn edit_reply(
    bot: &Bot,
    chat: ChatId,
    message_id: MessageId,
    reply: Reply,
) -> Result<(), RequestError> {
    let mut request = bot
        .edit_message_text(chat, message_id, reply.text)
        .parse_mode(ParseMode::Html)
        .link_preview_options(no_link_preview());
    if let Some(keyboard) = reply.keyboard {
        request = request.reply_markup(keyboard);
    }

    match request.await {
        Ok(_) => Ok(()),
        // pressing the button for the screen already shown
        Err(RequestError::Api(ApiError::MessageNotModified)) => Ok(()),
        Err(e) => Err(e),
    }
}

async fn answer_command(
    bot: &Bot,
    msg: &Message,
    cmd: Command,
    ctx: &AppContext,
) -> Result<(), RequestError> {
    let chat = msg.chat.id;

    if let Some((kind, slug)) = commands::metric_request(&cmd) {
        let placeholder = send_reply(bot, chat, stats::loading_reply(kind, &slug)).await?;
        let reply = stats::metric_reply(ctx, kind, &slug).await;
        return edit_reply(bot, chat, placeholder.id, reply).await;
    }

    let reply = commands::handle_command(ctx, cmd, chat.0).await;
    send_reply(bot, chat, reply).await.map(|_| ())
}

async fn on_command(bot: Bot, msg: Message, cmd: Command, ctx: Arc<AppContext>) -> HandlerResult {
    if let Err(e) = answer_command(&bot, &msg, cmd, &ctx).await {
        logger::error(
            LogTag::Telegram,
            &format!("Failed to answer command in chat {}: {}", msg.chat.id, e),
        );
    }
    Ok(())
}

async fn answer_callback(bot: &Bot, q: &CallbackQuery, ctx: &AppContext) -> Result<(), RequestError> {
    bot.answer_callback_query(&q.id).await?;

    let (chat, message_id) = match q.message.as_ref() {
        Some(message) => (message.chat().id, message.id()),
        None => {
            logger::warning(LogTag::Telegram, "Callback without message context");
            return Ok(());
        }
    };

    let data = q.data.as_deref().unwrap_or("");
    let action = match CallbackAction::parse(data) {
        Some(action) => action,
        None => {
            logger::debug(LogTag::Telegram, &format!("Unknown callback: {}", data));
            return Ok(());
        }
    };

    if let Some((kind, slug)) = action.metric_request() {
        edit_reply(bot, chat, message_id, stats::loading_reply(kind, slug)).await?;
    }

    let reply = callbacks::handle_callback(ctx, action, chat.0).await;
    edit_reply(bot, chat, message_id, reply).await
}

async fn on_callback(bot: Bot, q: CallbackQuery, ctx: Arc<AppContext>) -> HandlerResult {
    if let Err(e) = answer_callback(&bot, &q, &ctx).await {
        logger::error(
            LogTag::Telegram,
            &format!(
                "Failed to handle callback '{}': {}",
                q.data.as_deref().unwrap_or(""),
                e
            ),
        );
    }
    Ok(())
}

/// Register handlers and process updates until Ctrl-C
pub async fn run_dispatcher(bot: Bot, ctx: Arc<AppContext>) {
    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        logger::warning(
            LogTag::Telegram,
            &format!("Failed to publish command list: {}", e),
        );
    }

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(on_command),
        )
        .branch(Update::filter_callback_query().endpoint(on_callback));

    logger::info(LogTag::Telegram, "Bot is now running");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![ctx])
        .default_handler(|_| async {})
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    logger::info(LogTag::Telegram, "Dispatcher stopped");
}
