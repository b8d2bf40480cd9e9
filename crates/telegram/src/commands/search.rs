//! Search commands (/search and free-text queries)

use crate::constants::messages;
use crate::error::BotResult;
use crate::handlers;
use crate::keyboards;
use crate::session::{Sessions, UserSession};
use crate::types::HandlerResult;
use crate::utils;
use teloxide::prelude::*;
use torrent::YtsApi;

/// Handle `/search`, prompting for a query when none is given
pub async fn search_command(
    bot: Bot,
    msg: Message,
    query: String,
    yts: YtsApi,
    sessions: Sessions,
) -> HandlerResult {
    if query.trim().is_empty() {
        bot.send_message(msg.chat.id, messages::SEARCH_PROMPT).await?;
        return Ok(());
    }

    run_search(bot, msg, &query, yts, sessions).await
}

/// Treat any plain text message as a search query
pub async fn search_text(bot: Bot, msg: Message, yts: YtsApi, sessions: Sessions) -> HandlerResult {
    let text = msg.text().unwrap_or_default().to_string();
    run_search(bot, msg, &text, yts, sessions).await
}

async fn run_search(
    bot: Bot,
    msg: Message,
    text: &str,
    yts: YtsApi,
    sessions: Sessions,
) -> HandlerResult {
    let user_id = match msg.from() {
        Some(user) => user.id.0,
        None => {
            bot.send_message(msg.chat.id, messages::INVALID_MESSAGE).await?;
            return Ok(());
        }
    };

    tracing::info!(user_id, "Received search message: {}", text);

    if let Err(err) = search(&bot, &msg, user_id, text, &yts, &sessions).await {
        tracing::error!(user_id, error = ?err, "Error processing search");
        if let Err(send_err) = bot.send_message(msg.chat.id, messages::SEARCH_FAILED).await {
            tracing::error!("Failed to send error message: {}", send_err);
        }
    }

    Ok(())
}

async fn search(
    bot: &Bot,
    msg: &Message,
    user_id: u64,
    text: &str,
    yts: &YtsApi,
    sessions: &Sessions,
) -> BotResult<()> {
    let request = utils::parse_search_text(text);
    if request.query.is_empty() {
        bot.send_message(msg.chat.id, messages::EMPTY_QUERY).await?;
        return Ok(());
    }

    let progress = bot
        .send_message(msg.chat.id, handlers::searching_text(&request))
        .await?;

    let results = yts.search(&request.query, request.quality.as_deref()).await;
    if results.is_empty() {
        bot.edit_message_text(msg.chat.id, progress.id, handlers::no_results_text(&request.query))
            .await?;
        return Ok(());
    }

    tracing::info!(user_id, "Found {} results for '{}'", results.len(), request.query);

    let header = handlers::results_header(results.len(), &request.query);
    let keyboard = keyboards::results_keyboard(&results);

    sessions
        .save(
            user_id,
            UserSession {
                results,
                query: request.query,
                quality: request.quality,
            },
        )
        .await;

    bot.edit_message_text(msg.chat.id, progress.id, header)
        .reply_markup(keyboard)
        .await?;
    Ok(())
}
