use std::{sync::Arc, time::Duration};

use reqwest::Client;

use crate::constants::{API_TIMEOUT_SECS, MAX_RESULTS, SEARCH_PAGE_LIMIT, USER_AGENT};
use crate::error::ApiError;
use crate::links;
use crate::model::{ApiResponse, MovieDetails, MovieDetailsData, MovieList, SearchResult, StreamLink};

/// Wrapper around the YTS JSON API
#[derive(Clone, Debug)]
pub struct YtsApi {
    client: Client,
    base_url: Arc<str>,
}

impl YtsApi {
    /// Create a new client for the API rooted at `base_url`
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(API_TIMEOUT_SECS))
            .build()
            .map_err(ApiError::Client)?;

        Ok(YtsApi {
            client,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search movies and flatten their torrents into results
    ///
    /// Never fails: any error is logged and yields an empty list.
    /// Results are filtered by `quality` (case-insensitive), sorted by
    /// seeds descending and truncated to [`MAX_RESULTS`].
    pub async fn search(&self, query: &str, quality: Option<&str>) -> Vec<SearchResult> {
        tracing::info!("Searching for '{}' on YTS", query);

        let movies = match self.list_movies(query).await {
            Ok(list) => list,
            Err(err) => {
                tracing::error!("Error searching YTS: {}", err);
                return Vec::new();
            }
        };

        if movies.movie_count == 0 {
            tracing::info!("No movies found for query: {}", query);
            return Vec::new();
        }

        let mut results: Vec<SearchResult> = movies
            .movies
            .iter()
            .flat_map(|movie| {
                movie
                    .torrents
                    .iter()
                    .filter(|torrent| quality_matches(quality, &torrent.quality))
                    .map(move |torrent| SearchResult::from_parts(movie, torrent))
            })
            .collect();

        results.sort_by(|a, b| b.seeds.cmp(&a.seeds));
        results.truncate(MAX_RESULTS);

        tracing::debug!("Search for '{}' returned {} results", query, results.len());
        results
    }

    async fn list_movies(&self, query: &str) -> Result<MovieList, ApiError> {
        let limit = SEARCH_PAGE_LIMIT.to_string();
        let params = [
            ("query_term", query),
            ("limit", limit.as_str()),
            ("sort_by", "download_count"),
            ("order_by", "desc"),
        ];

        let resp: ApiResponse<MovieList> = self.get_json("list_movies.json", &params).await?;
        Ok(resp.data.unwrap_or_default())
    }

    /// Fetch full details of a movie, including cast and torrents
    ///
    /// # Errors
    /// Returns an error on network failure, a non-"ok" API status, or a
    /// response without a movie
    pub async fn movie_details(&self, movie_id: u64) -> Result<MovieDetails, ApiError> {
        let id = movie_id.to_string();
        let params = [
            ("movie_id", id.as_str()),
            ("with_images", "true"),
            ("with_cast", "true"),
        ];

        let resp: ApiResponse<MovieDetailsData> = self.get_json("movie_details.json", &params).await?;
        resp.data
            .and_then(|data| data.movie)
            .ok_or(ApiError::MovieNotFound(movie_id))
    }

    /// Build streaming and magnet links for every torrent of a movie
    ///
    /// Torrents without a hash are skipped.
    pub async fn stream_links(
        &self,
        movie_id: u64,
        quality: Option<&str>,
    ) -> Result<Vec<StreamLink>, ApiError> {
        let details = self.movie_details(movie_id).await?;
        Ok(stream_links_for(&details, quality))
    }

    async fn get_json<T>(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<ApiResponse<T>, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, endpoint);
        let request_err = |source| ApiError::Request {
            endpoint: endpoint.to_string(),
            source,
        };

        let resp: ApiResponse<T> = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(request_err)?
            .json()
            .await
            .map_err(request_err)?;

        if resp.status != "ok" {
            let message = resp
                .status_message
                .unwrap_or_else(|| "Unknown error".to_string());
            tracing::error!("YTS API error on {}: {}", endpoint, message);
            return Err(ApiError::Status(message));
        }

        Ok(resp)
    }
}

/// Streaming links for the torrents of an already fetched movie
pub fn stream_links_for(details: &MovieDetails, quality: Option<&str>) -> Vec<StreamLink> {
    details
        .torrents
        .iter()
        .filter(|torrent| !torrent.hash.is_empty())
        .filter(|torrent| quality_matches(quality, &torrent.quality))
        .map(|torrent| StreamLink {
            title: format!("{} - {} (Stream/Download)", details.title_long, torrent.quality),
            quality: torrent.quality.clone(),
            size: torrent.size.clone(),
            url: links::streaming_link(&torrent.hash, &details.title_long),
            magnet: links::magnet_link(&torrent.hash, &details.title_long),
        })
        .collect()
}

fn quality_matches(filter: Option<&str>, quality: &str) -> bool {
    match filter {
        Some(wanted) if !wanted.is_empty() => wanted.eq_ignore_ascii_case(quality),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_matches() {
        assert!(quality_matches(None, "720p"));
        assert!(quality_matches(Some(""), "720p"));
        assert!(quality_matches(Some("1080P"), "1080p"));
        assert!(!quality_matches(Some("720p"), "1080p"));
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let api = YtsApi::new("https://yts.mx/api/v2/").unwrap();
        assert_eq!(api.base_url(), "https://yts.mx/api/v2");
    }

    #[test]
    fn test_stream_links_for_skips_missing_hash() {
        let details: MovieDetails = serde_json::from_value(serde_json::json!({
            "id": 3,
            "title_long": "Heat (1995)",
            "torrents": [
                {"hash": "AAA", "quality": "720p", "size": "1 GB"},
                {"hash": "", "quality": "1080p", "size": "2 GB"},
                {"hash": "CCC", "quality": "1080p", "size": "2 GB"}
            ]
        }))
        .unwrap();

        let all = stream_links_for(&details, None);
        assert_eq!(all.len(), 2);
        assert!(all[0].url.starts_with("https://webtor.io/#"));
        assert!(all[0].magnet.starts_with("magnet:?xt=urn:btih:AAA"));

        let hd = stream_links_for(&details, Some("1080p"));
        assert_eq!(hd.len(), 1);
        assert_eq!(hd[0].title, "Heat (1995) - 1080p (Stream/Download)");
    }
}
