//! Basic bot commands (start, help)

use crate::constants::messages;
use crate::handlers;
use crate::types::{Command, HandlerResult};
use teloxide::{prelude::*, utils::command::BotCommands};

/// Welcome message when user starts the bot
pub async fn start(bot: Bot, msg: Message) -> HandlerResult {
    let first_name = msg
        .from()
        .map(|user| user.first_name.as_str())
        .unwrap_or("there");

    tracing::info!(
        user_id = msg.from().map(|u| u.id.0),
        "Received /start command from {}",
        first_name
    );

    bot.send_message(msg.chat.id, handlers::welcome_text(first_name))
        .await?;
    Ok(())
}

/// Display help message with usage and available commands
pub async fn help(bot: Bot, msg: Message) -> HandlerResult {
    let text = handlers::help_text(&Command::descriptions().to_string());
    bot.send_message(msg.chat.id, text).await?;
    Ok(())
}

/// Handle messages no other branch accepts
pub async fn invalid_state(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, messages::INVALID_MESSAGE)
        .await?;
    Ok(())
}
