//! Runtime configuration read from the environment

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_SESSION_TTL_SECS: u64 = 3600;
pub const DEFAULT_HEALTH_HOST: &str = "0.0.0.0";
pub const DEFAULT_HEALTH_PORT: u16 = 8080;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("TELEGRAM_BOT_TOKEN (or TELOXIDE_TOKEN) is not set")]
    MissingToken,
    #[error("Invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Log output flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub token: String,
    pub api_url: String,
    pub download_dir: PathBuf,
    pub session_ttl: Duration,
    pub health_host: String,
    pub health_port: u16,
}

impl Config {
    /// Read the configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let token = get("TELEGRAM_BOT_TOKEN")
            .or_else(|| get("TELOXIDE_TOKEN"))
            .ok_or(ConfigError::MissingToken)?;

        let api_url = get("YTS_API_URL").unwrap_or_else(|| torrent::constants::DEFAULT_API_URL.to_string());
        let download_dir = get("DOWNLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(torrent::Downloader::default_dir);

        let ttl_secs = parse_or(get("SESSION_TTL_SECS"), "SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS)?;
        let health_port = parse_or(get("HEALTH_PORT"), "HEALTH_PORT", DEFAULT_HEALTH_PORT)?;
        let health_host = get("HEALTH_HOST").unwrap_or_else(|| DEFAULT_HEALTH_HOST.to_string());

        Ok(Self {
            token,
            api_url,
            download_dir,
            session_ttl: Duration::from_secs(ttl_secs),
            health_host,
            health_port,
        })
    }
}

impl LogFormat {
    pub fn from_env() -> Self {
        Self::parse(std::env::var("LOG_FORMAT").ok().as_deref())
    }

    /// Anything but `json` falls back to pretty output
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

fn parse_or<T: FromStr>(value: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[("TELEGRAM_BOT_TOKEN", "123:abc")]).unwrap();
        assert_eq!(config.token, "123:abc");
        assert_eq!(config.api_url, "https://yts.mx/api/v2");
        assert_eq!(config.session_ttl, Duration::from_secs(3600));
        assert_eq!(config.health_host, "0.0.0.0");
        assert_eq!(config.health_port, 8080);
        assert!(config.download_dir.ends_with("telegram_downloads"));
    }

    #[test]
    fn test_missing_token() {
        assert_eq!(config(&[]), Err(ConfigError::MissingToken));
        assert_eq!(config(&[("TELEGRAM_BOT_TOKEN", "  ")]), Err(ConfigError::MissingToken));
    }

    #[test]
    fn test_teloxide_token_fallback() {
        let config = config(&[("TELOXIDE_TOKEN", "456:def")]).unwrap();
        assert_eq!(config.token, "456:def");
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("TELEGRAM_BOT_TOKEN", "t"),
            ("YTS_API_URL", "http://localhost:9000/api/v2"),
            ("DOWNLOAD_DIR", "/var/tmp/torrents"),
            ("SESSION_TTL_SECS", "60"),
            ("HEALTH_HOST", "127.0.0.1"),
            ("HEALTH_PORT", "3000"),
        ])
        .unwrap();

        assert_eq!(config.api_url, "http://localhost:9000/api/v2");
        assert_eq!(config.download_dir, PathBuf::from("/var/tmp/torrents"));
        assert_eq!(config.session_ttl, Duration::from_secs(60));
        assert_eq!(config.health_host, "127.0.0.1");
        assert_eq!(config.health_port, 3000);
    }

    #[test]
    fn test_malformed_numbers() {
        assert_eq!(
            config(&[("TELEGRAM_BOT_TOKEN", "t"), ("HEALTH_PORT", "eighty")]),
            Err(ConfigError::Invalid {
                key: "HEALTH_PORT",
                value: "eighty".to_string()
            })
        );
        assert!(matches!(
            config(&[("TELEGRAM_BOT_TOKEN", "t"), ("SESSION_TTL_SECS", "-1")]),
            Err(ConfigError::Invalid { key: "SESSION_TTL_SECS", .. })
        ));
    }

    #[test]
    fn test_log_format() {
        assert_eq!(LogFormat::parse(Some("json")), LogFormat::Json);
        assert_eq!(LogFormat::parse(Some("JSON ")), LogFormat::Json);
        assert_eq!(LogFormat::parse(Some("pretty")), LogFormat::Pretty);
        assert_eq!(LogFormat::parse(None), LogFormat::Pretty);
    }
}
