//! Callback query handlers for inline keyboard interactions
//!
//! Result buttons carry `file_<index>` or `details_<index>`; the index
//! refers to the current search session of the pressing user.

use crate::constants::messages;
use crate::error::{BotError, BotResult, UserMessage};
use crate::handlers;
use crate::keyboards;
use crate::session::{SelectionError, Sessions};
use crate::types::{CallbackAction, HandlerResult};
use crate::utils;
use teloxide::{prelude::*, types::InputFile};
use torrent::{client::stream_links_for, DownloadedFile, Downloader, SearchResult, YtsApi};

/// Handle all callback queries from inline keyboards
pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    yts: YtsApi,
    sessions: Sessions,
    downloader: Downloader,
) -> HandlerResult {
    let user_id = q.from.id.0;
    let data = q.data.as_deref().unwrap_or_default();
    tracing::info!(user_id, "Received callback: {}", data);

    let action = utils::parse_callback_data(data);
    let index = match action {
        CallbackAction::SendFile(i) | CallbackAction::Details(i) => i,
        CallbackAction::Unknown => {
            tracing::warn!("Unknown callback data: {}", data);
            bot.answer_callback_query(&q.id)
                .text(messages::UNKNOWN_CALLBACK)
                .await?;
            return Ok(());
        }
    };

    let message = match q.message.as_ref() {
        Some(msg) => msg,
        None => {
            bot.answer_callback_query(&q.id)
                .text(messages::SESSION_EXPIRED)
                .await?;
            return Ok(());
        }
    };

    let result = match sessions.select(user_id, index).await {
        Ok(result) => result,
        Err(err) => {
            tracing::info!(user_id, ?err, "Rejected selection {}", index);
            bot.answer_callback_query(&q.id)
                .text(selection_error_text(err))
                .await?;
            if err == SelectionError::Expired {
                bot.edit_message_text(message.chat.id, message.id, messages::SESSION_EXPIRED)
                    .await?;
            }
            return Ok(());
        }
    };

    match action {
        CallbackAction::SendFile(_) => {
            if let Err(err) = send_file(&bot, &q, message, result, &downloader).await {
                tracing::error!(user_id, error = ?err, "Error processing file selection");
                if let Err(e) = bot
                    .edit_message_text(message.chat.id, message.id, messages::SELECTION_FAILED)
                    .await
                {
                    tracing::error!("Failed to send error message: {}", e);
                }
            }
        }
        CallbackAction::Details(_) => {
            if let Err(err) = send_details(&bot, &q, message, result, &yts).await {
                tracing::error!(user_id, error = ?err, "Error processing details request");
                if let Err(e) = bot.send_message(message.chat.id, err.user_message()).await {
                    tracing::error!("Failed to send error message: {}", e);
                }
            }
        }
        CallbackAction::Unknown => {}
    }

    Ok(())
}

/// Text shown to the user when a selection cannot be resolved
pub fn selection_error_text(err: SelectionError) -> &'static str {
    match err {
        SelectionError::Expired => messages::SESSION_EXPIRED,
        SelectionError::OutOfRange { .. } => messages::INVALID_SELECTION,
    }
}

/// Download the selected torrent and send it as a document
async fn send_file(
    bot: &Bot,
    q: &CallbackQuery,
    message: &Message,
    result: SearchResult,
    downloader: &Downloader,
) -> BotResult<()> {
    bot.answer_callback_query(&q.id).await?;

    let chat_id = message.chat.id;
    bot.edit_message_text(chat_id, message.id, handlers::preparing_text(&result))
        .await?;

    let file = match downloader.download(&result.url).await {
        Ok(file) => file,
        Err(err) => {
            tracing::error!("Failed to download {}: {}", result.url, err);
            bot.edit_message_text(chat_id, message.id, handlers::download_failed_text(&err.to_string()))
                .await?;
            return Ok(());
        }
    };

    check_info_hash(&file, &result).await;

    let sent = deliver_file(bot, message, &file, &result).await;
    file.cleanup();
    sent
}

async fn deliver_file(
    bot: &Bot,
    message: &Message,
    file: &DownloadedFile,
    result: &SearchResult,
) -> BotResult<()> {
    let chat_id = message.chat.id;
    bot.edit_message_text(chat_id, message.id, handlers::sending_text(result))
        .await?;

    let document = InputFile::file(file.path().to_path_buf())
        .file_name(format!("{}.torrent", utils::sanitize_filename(&result.title)));

    let mut request = bot
        .send_document(chat_id, document)
        .caption(handlers::file_caption(result));
    if let Some(keyboard) = keyboards::stream_keyboard(&torrent::streaming_link(&result.hash, &result.title)) {
        request = request.reply_markup(keyboard);
    }

    match request.await {
        Ok(_) => {
            tracing::info!("Sent torrent file for '{}' to chat {}", result.title, chat_id);
            bot.edit_message_text(chat_id, message.id, handlers::sent_text(result))
                .await?;
        }
        Err(err) => {
            tracing::error!("Error sending torrent file: {}", err);
            bot.edit_message_text(chat_id, message.id, handlers::send_failed_text(&err.to_string()))
                .await?;
        }
    }

    Ok(())
}

/// Warn when the downloaded file does not match the advertised hash
async fn check_info_hash(file: &DownloadedFile, result: &SearchResult) {
    match file.info_hash().await {
        Some(hash) if torrent::utils::same_info_hash(&hash, &result.hash) => {
            tracing::debug!("Verified info hash {}", hash);
        }
        Some(hash) => {
            tracing::warn!("Info hash mismatch for '{}': expected {}, got {}", result.title, result.hash, hash);
        }
        None => {
            tracing::warn!("Downloaded file for '{}' is not a valid torrent", result.title);
        }
    }
}

/// Send movie details with streaming links for every quality
async fn send_details(
    bot: &Bot,
    q: &CallbackQuery,
    message: &Message,
    result: SearchResult,
    yts: &YtsApi,
) -> BotResult<()> {
    bot.answer_callback_query(&q.id).await?;

    let details = yts.movie_details(result.movie_id).await.map_err(BotError::from)?;
    let magnet = torrent::magnet_link(&result.hash, &details.title_long);
    let text = handlers::format_movie_details(&details, &result, &magnet);

    let mut request = bot
        .send_message(message.chat.id, text)
        .disable_web_page_preview(true);
    if let Some(keyboard) = keyboards::stream_links_keyboard(&stream_links_for(&details, None)) {
        request = request.reply_markup(keyboard);
    }
    request.await?;

    Ok(())
}
