use thiserror::Error;

use crate::constants::emoji;

/// Custom error type for telegram bot operations
#[derive(Debug, Error)]
pub enum BotError {
    /// Telegram API error
    #[error("Telegram error: {0}")]
    TelegramError(#[from] teloxide::RequestError),
    /// YTS API error
    #[error("YTS error: {0}")]
    ApiError(#[from] torrent::ApiError),
    /// Torrent file download error
    #[error("Download error: {0}")]
    DownloadError(#[from] torrent::DownloadError),
    /// Generic error with message
    #[error("{0}")]
    Message(String),
}

/// Result type alias for bot operations
pub type BotResult<T> = Result<T, BotError>;

/// Helper trait to convert errors into user-friendly messages
pub trait UserMessage {
    fn user_message(&self) -> String;
}

impl UserMessage for BotError {
    fn user_message(&self) -> String {
        match self {
            BotError::TelegramError(e) => format!("{} Communication error: {}", emoji::ERROR, e),
            BotError::ApiError(e) => format!("{} Could not reach the movie index: {}", emoji::ERROR, e),
            BotError::DownloadError(e) => format!("{} {}", emoji::ERROR, e),
            BotError::Message(msg) => format!("{} {}", emoji::ERROR, msg),
        }
    }
}
