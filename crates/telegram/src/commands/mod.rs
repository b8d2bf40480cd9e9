//! Command handlers for the Telegram bot
//!
//! - `basic`: start, help and fallback replies
//! - `search`: `/search` and free-text movie searches

mod basic;
mod search;

pub use basic::*;
pub use search::*;
