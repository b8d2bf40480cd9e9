//! HTTP health endpoint for uptime monitors
//!
//! Serves a static JSON payload on `/` and `/health`. It shares no state
//! with the bot.

mod server;

pub use server::{router, serve, HealthError, HealthStatus};
