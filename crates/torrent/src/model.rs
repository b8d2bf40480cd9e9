//! YTS API payloads and the flattened records handed to the bot

use serde::{Deserialize, Deserializer, Serialize};

/// Envelope shared by every YTS API response
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    #[serde(default)]
    pub status_message: Option<String>,
    pub data: Option<T>,
}

/// Payload of `list_movies.json`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub movie_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub movies: Vec<Movie>,
}

/// A movie as listed by `list_movies.json`
#[derive(Debug, Clone, Deserialize)]
pub struct Movie {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default = "unknown_title", deserialize_with = "title_or_unknown")]
    pub title_long: String,
    #[serde(default)]
    pub year: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f64,
    #[serde(default)]
    pub medium_cover_image: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub torrents: Vec<TorrentInfo>,
}

/// One downloadable torrent of a movie
#[derive(Debug, Clone, Deserialize)]
pub struct TorrentInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hash: String,
    #[serde(default = "unknown_quality", deserialize_with = "quality_or_unknown")]
    pub quality: String,
    #[serde(default = "unknown_size", deserialize_with = "size_or_unknown")]
    pub size: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub seeds: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub peers: u64,
}

/// Payload of `movie_details.json`
#[derive(Debug, Clone, Deserialize)]
pub struct MovieDetailsData {
    pub movie: Option<MovieDetails>,
}

/// Detailed movie information
#[derive(Debug, Clone, Deserialize)]
pub struct MovieDetails {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default = "unknown_title", deserialize_with = "title_or_unknown")]
    pub title_long: String,
    #[serde(default)]
    pub year: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub runtime: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description_full: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date_uploaded_unix: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cast: Vec<CastMember>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub torrents: Vec<TorrentInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CastMember {
    pub name: String,
    #[serde(default)]
    pub character_name: Option<String>,
}

/// Kind of file a result points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Video,
}

/// A single selectable search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    /// `.torrent` download URL
    pub url: String,
    /// Human-formatted size as reported by the API
    pub size: String,
    pub media_type: MediaType,
    pub seeds: u64,
    pub quality: String,
    pub hash: String,
    pub thumbnail: Option<String>,
    pub movie_id: u64,
    pub movie_url: String,
}

impl SearchResult {
    pub(crate) fn from_parts(movie: &Movie, torrent: &TorrentInfo) -> Self {
        let year = movie
            .year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        SearchResult {
            title: format!(
                "{} ({}) - {} [Rating: {}]",
                movie.title_long, year, torrent.quality, movie.rating
            ),
            url: torrent.url.clone(),
            size: torrent.size.clone(),
            media_type: MediaType::Video,
            seeds: torrent.seeds,
            quality: torrent.quality.clone(),
            hash: torrent.hash.clone(),
            thumbnail: movie.medium_cover_image.clone(),
            movie_id: movie.id,
            movie_url: movie.url.clone(),
        }
    }
}

/// Browser streaming link for one torrent of a movie
#[derive(Debug, Clone, PartialEq)]
pub struct StreamLink {
    pub title: String,
    pub quality: String,
    pub size: String,
    pub url: String,
    pub magnet: String,
}

fn unknown_title() -> String {
    "Unknown Title".to_string()
}

fn unknown_quality() -> String {
    "Unknown".to_string()
}

fn unknown_size() -> String {
    "Unknown size".to_string()
}

/// The API sends `null` for some missing values, treat it like an absent key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn title_or_unknown<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::deserialize(deserializer)?.unwrap_or_else(unknown_title))
}

fn quality_or_unknown<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::deserialize(deserializer)?.unwrap_or_else(unknown_quality))
}

fn size_or_unknown<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::deserialize(deserializer)?.unwrap_or_else(unknown_size))
}
