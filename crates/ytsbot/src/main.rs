mod config;

use std::process::ExitCode;
use std::time::Duration;

use config::{Config, LogFormat};
use ::telegram::{constants::SESSION_CLEANUP_INTERVAL_SECS, telegram, Sessions};
use teloxide::prelude::*;
use torrent::{Downloader, YtsApi};

/// Delay before the polling loop is started again after a crash
const RESTART_DELAY: Duration = Duration::from_secs(5);

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    match format {
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    let _ = dotenv::dotenv();

    init_tracing(LogFormat::from_env());

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let yts = match YtsApi::new(&config.api_url) {
        Ok(yts) => yts,
        Err(e) => {
            tracing::error!("Failed to create YTS client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let downloader = match Downloader::new(&config.download_dir) {
        Ok(downloader) => downloader,
        Err(e) => {
            tracing::error!("Failed to create downloader: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let sessions = Sessions::in_memory(config.session_ttl);

    let (host, port) = (config.health_host.clone(), config.health_port);
    tokio::spawn(async move {
        if let Err(e) = healthcheck::serve(&host, port).await {
            tracing::error!("Health server stopped: {}", e);
        }
    });

    spawn_session_cleanup(sessions.clone());

    let bot = Bot::new(&config.token);

    if let Err(e) = bot.delete_webhook().await {
        tracing::warn!("Failed to delete webhook: {}", e);
    }
    if let Err(e) = telegram::set_bot_commands(&bot).await {
        tracing::warn!("Failed to register bot commands: {}", e);
    }

    tracing::info!(
        api_url = %config.api_url,
        download_dir = %downloader.dir().display(),
        "Bot started successfully!"
    );

    loop {
        let polling = {
            let bot = bot.clone();
            let deps = dptree::deps![yts.clone(), sessions.clone(), downloader.clone()];
            tokio::spawn(async move {
                Dispatcher::builder(bot, telegram::schema())
                    .dependencies(deps)
                    .error_handler(LoggingErrorHandler::with_custom_text(
                        "An error has occurred in the dispatcher",
                    ))
                    .enable_ctrlc_handler()
                    .build()
                    .dispatch()
                    .await;
            })
        };

        match polling.await {
            Ok(()) => {
                tracing::info!("Bot stopped");
                break;
            }
            Err(e) if e.is_panic() => {
                tracing::error!("Polling crashed, restarting in {:?}: {}", RESTART_DELAY, e);
                tokio::time::sleep(RESTART_DELAY).await;
            }
            Err(e) => {
                tracing::error!("Polling task cancelled: {}", e);
                break;
            }
        }
    }

    ExitCode::SUCCESS
}

/// Periodically drop expired sessions and idle user locks
fn spawn_session_cleanup(sessions: Sessions) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(SESSION_CLEANUP_INTERVAL_SECS));
        // The first tick completes immediately
        interval.tick().await;

        loop {
            interval.tick().await;
            let purged = sessions.cleanup();
            if purged > 0 {
                tracing::info!("Removed {} expired sessions", purged);
            }
        }
    });
}
