//! Constants shared by the API client and the downloader

/// Default base URL of the YTS JSON API
pub const DEFAULT_API_URL: &str = "https://yts.mx/api/v2";

/// Browser user agent sent with every request
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Timeout for API calls in seconds
pub const API_TIMEOUT_SECS: u64 = 10;

/// Timeout for file downloads in seconds
pub const DOWNLOAD_TIMEOUT_SECS: u64 = 30;

/// Maximum size of a downloaded file (Telegram bot upload limit)
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Number of movies requested per search
pub const SEARCH_PAGE_LIMIT: u32 = 20;

/// Maximum number of results returned from a search
pub const MAX_RESULTS: usize = 10;

/// Name of the download directory created under the system temp dir
pub const DOWNLOAD_DIR_NAME: &str = "telegram_downloads";
