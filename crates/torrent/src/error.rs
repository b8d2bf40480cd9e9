//! Error types for YTS API calls and file downloads

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by the YTS API client
#[derive(Debug, Error)]
pub enum ApiError {
    /// Failed to build the underlying HTTP client
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Network error, timeout, non-success status or undecodable body
    #[error("request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a status other than "ok"
    #[error("YTS API error: {0}")]
    Status(String),

    /// The API answered "ok" but without the expected payload
    #[error("movie {0} not found")]
    MovieNotFound(u64),
}

/// Errors that can occur while downloading a file
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Nothing to download
    #[error("URL is empty")]
    EmptyUrl,

    /// Failed to build the underlying HTTP client
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Network-level error or timeout
    #[error("download error: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status
    #[error("download error: HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// The file is larger than the configured ceiling
    #[error("File too large ({} MB)", megabytes(.size))]
    TooLarge { size: u64, limit: u64 },

    /// Local file system error
    #[error("IO error writing to {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn megabytes(bytes: &u64) -> String {
    format!("{:.2}", *bytes as f64 / (1024.0 * 1024.0))
}

impl DownloadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DownloadError::Io {
            path: path.into(),
            source,
        }
    }
}
