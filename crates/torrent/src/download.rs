//! Streaming download of `.torrent` files into a temp directory

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::Client;
use tempfile::TempPath;
use tokio::io::AsyncWriteExt;

use crate::constants::{DOWNLOAD_DIR_NAME, DOWNLOAD_TIMEOUT_SECS, MAX_FILE_SIZE, USER_AGENT};
use crate::error::DownloadError;
use crate::utils;

/// Downloads files into a dedicated directory
#[derive(Clone, Debug)]
pub struct Downloader {
    client: Client,
    dir: PathBuf,
    max_size: u64,
}

/// A downloaded file on disk
///
/// The file is removed when this value is dropped, or explicitly with
/// [`DownloadedFile::cleanup`].
#[derive(Debug)]
pub struct DownloadedFile {
    path: TempPath,
    size: u64,
}

impl DownloadedFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Info hash of the downloaded torrent, if it parses as one
    pub async fn info_hash(&self) -> Option<String> {
        let data = tokio::fs::read(self.path()).await.ok()?;
        if !utils::is_bencoded_dict(&data) {
            return None;
        }
        utils::torrent_info_hash(&data)
    }

    /// Delete the file from disk
    pub fn cleanup(self) {
        let shown = self.path.display().to_string();
        match self.path.close() {
            Ok(()) => tracing::info!("Deleted temporary file: {}", shown),
            Err(err) => tracing::error!("Error removing file {}: {}", shown, err),
        }
    }
}

impl Downloader {
    /// Create a downloader writing into `dir` with the default size ceiling
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, DownloadError> {
        Self::with_max_size(dir, MAX_FILE_SIZE)
    }

    /// Create a downloader with an explicit size ceiling in bytes
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built
    pub fn with_max_size(dir: impl Into<PathBuf>, max_size: u64) -> Result<Self, DownloadError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
            .build()
            .map_err(DownloadError::Client)?;

        Ok(Downloader {
            client,
            dir: dir.into(),
            max_size,
        })
    }

    /// Default download directory under the system temp dir
    pub fn default_dir() -> PathBuf {
        std::env::temp_dir().join(DOWNLOAD_DIR_NAME)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    /// Download `url` into a fresh `movie_*.torrent` file
    ///
    /// A declared `Content-Length` above the ceiling is rejected before any
    /// file is created. A body that grows past the ceiling while streaming
    /// is aborted and the partial file removed.
    ///
    /// # Errors
    /// Returns an error for an empty URL, network failures, non-success
    /// status codes, oversize files and local IO failures
    pub async fn download(&self, url: &str) -> Result<DownloadedFile, DownloadError> {
        if url.is_empty() {
            return Err(DownloadError::EmptyUrl);
        }

        tracing::info!("Downloading file from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| DownloadError::Network {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if let Some(declared) = response.content_length() {
            if declared > self.max_size {
                tracing::warn!("Rejecting {}: declared size {} bytes", url, declared);
                return Err(DownloadError::TooLarge {
                    size: declared,
                    limit: self.max_size,
                });
            }
        }

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| DownloadError::io(&self.dir, e))?;

        let (file, path) = tempfile::Builder::new()
            .prefix("movie_")
            .suffix(".torrent")
            .rand_bytes(10)
            .tempfile_in(&self.dir)
            .map_err(|e| DownloadError::io(&self.dir, e))?
            .into_parts();
        let mut file = tokio::fs::File::from_std(file);

        let mut written: u64 = 0;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|source| DownloadError::Network {
                url: url.to_string(),
                source,
            })?;

            written += chunk.len() as u64;
            if written > self.max_size {
                return Err(DownloadError::TooLarge {
                    size: written,
                    limit: self.max_size,
                });
            }

            file.write_all(&chunk)
                .await
                .map_err(|e| DownloadError::io(path.to_path_buf(), e))?;
        }

        file.flush()
            .await
            .map_err(|e| DownloadError::io(path.to_path_buf(), e))?;

        tracing::info!("File downloaded successfully to {} ({} bytes)", path.display(), written);

        Ok(DownloadedFile { path, size: written })
    }
}
