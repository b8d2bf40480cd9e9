use crate::types::Command;
use crate::{callbacks, commands};
use teloxide::{dispatching::UpdateHandler, prelude::*, utils::command::BotCommands};

/// Register bot commands in Telegram menu
pub async fn set_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(Command::bot_commands()).await?;
    Ok(())
}

/// Plain text that is not a command is treated as a search query
fn is_search_text(msg: &Message) -> bool {
    msg.text().map_or(false, |text| !text.trim().is_empty() && !text.starts_with('/'))
}

pub fn schema() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    use dptree::case;

    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(case![Command::Start].endpoint(commands::start))
        .branch(case![Command::Help].endpoint(commands::help))
        .branch(case![Command::Search(query)].endpoint(commands::search_command));

    let message_handler = Update::filter_message()
        .branch(command_handler)
        .branch(dptree::filter(|msg: Message| is_search_text(&msg)).endpoint(commands::search_text))
        .branch(dptree::endpoint(commands::invalid_state));

    // Handle callback queries from inline keyboards
    let callback_handler = Update::filter_callback_query().endpoint(callbacks::handle_callback);

    dptree::entry()
        .branch(message_handler)
        .branch(callback_handler)
}
