pub mod callbacks;
pub mod commands;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod keyboards;
pub mod session;
pub mod telegram;
pub mod types;
pub mod utils;

pub use error::{BotError, BotResult};
pub use session::{InMemSessionStore, SessionStore, Sessions, UserSession};
pub use teloxide::prelude::Dispatcher;
pub use types::{Command, HandlerResult};
