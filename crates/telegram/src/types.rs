use teloxide::macros::BotCommands;

/// Type alias for handler result types
pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Available bot commands
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(
    rename_rule = "lowercase",
    description = "These commands are supported:"
)]
pub enum Command {
    #[command(description = "Show the welcome message")]
    Start,
    #[command(description = "Display help information")]
    Help,
    #[command(description = "Search for a movie, e.g. /search 1080p Inception")]
    Search(String),
}

/// Action encoded in an inline button's callback data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    /// Send the torrent file of result `n`
    SendFile(usize),
    /// Show movie details of result `n`
    Details(usize),
    Unknown,
}

/// A free-text search split into query and quality filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub quality: Option<String>,
}
