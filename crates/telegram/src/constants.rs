//! Constants used throughout the telegram bot

/// Quality tokens recognised in search messages
pub const QUALITY_TOKENS: [&str; 3] = ["720p", "1080p", "2160p"];

/// Maximum number of title characters shown on a result button
pub const BUTTON_TITLE_LENGTH: usize = 30;

/// Maximum description length in the details message
pub const DESCRIPTION_LENGTH: usize = 700;

/// Number of cast members listed in the details message
pub const MAX_CAST_DISPLAY: usize = 5;

/// Maximum accepted callback data length in bytes
pub const MAX_CALLBACK_DATA_LEN: usize = 64;

/// Callback data prefix for sending a torrent file
pub const FILE_PREFIX: &str = "file_";

/// Callback data prefix for showing movie details
pub const DETAILS_PREFIX: &str = "details_";

/// Interval between session cleanups in seconds
pub const SESSION_CLEANUP_INTERVAL_SECS: u64 = 600;

/// Emoji constants for consistent UI
pub mod emoji {
    pub const SUCCESS: &str = "✅";
    pub const ERROR: &str = "❌";
    pub const SEARCH: &str = "🔍";
    pub const MOVIE: &str = "🎬";
    pub const FOLDER: &str = "📁";
    pub const WAIT: &str = "⏳";
    pub const INFO: &str = "ℹ️";
    pub const STREAM: &str = "▶️";
    pub const STAR: &str = "⭐";
}

/// User-facing messages
pub mod messages {
    pub const SEARCH_PROMPT: &str = "Please enter a movie name to search for:\n\n\
        Example: Avengers\n\n\
        You can also specify quality: 720p Avengers";

    pub const EMPTY_QUERY: &str = "Please provide a search term.\n\
        Example: Avengers\n\
        You can also specify quality: 720p Avengers";

    pub const SESSION_EXPIRED: &str = "Search session expired. Please search again.";

    pub const INVALID_SELECTION: &str = "Invalid selection. Please search again.";

    pub const UNKNOWN_CALLBACK: &str = "Unknown callback";

    pub const SEARCH_FAILED: &str = "❌ Error searching for files.\n\nPlease try again later.";

    pub const SELECTION_FAILED: &str = "❌ Error processing your selection.\n\nPlease try again later.";

    pub const INVALID_MESSAGE: &str = "Unable to handle the message. Type /help to see the usage.";
}
