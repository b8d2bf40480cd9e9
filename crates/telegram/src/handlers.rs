//! Message text builders shared by commands and callbacks

use torrent::{MovieDetails, SearchResult};

use crate::constants::{emoji, DESCRIPTION_LENGTH, MAX_CAST_DISPLAY};
use crate::types::SearchRequest;
use crate::utils;

pub fn welcome_text(first_name: &str) -> String {
    format!(
        "👋 Hello, {}!\n\n\
        I can help you find movies and send you torrent files directly.\n\n\
        To search for movies, use the /search command or simply send me a message with your search term.\n\n\
        Example: Avengers\n\n\
        You can also specify quality: 720p Avengers\n\n\
        I'll send you torrent files that you can upload to webtor.io to stream or download without a torrent client! {}\n\n\
        Type /help for more information.",
        first_name,
        emoji::MOVIE
    )
}

pub fn help_text(commands: &str) -> String {
    format!(
        "{} Search:\n\
        /search - Start a search\n\
        Or directly send your search term\n\n\
        Quality options:\n\
        - 720p\n\
        - 1080p\n\
        - 2160p (4K)\n\n\
        Examples:\n\
        • Avengers\n\
        • 720p Inception\n\
        • 1080p The Matrix\n\n\
        What you'll get:\n\
        I'll send you torrent files that you can upload to webtor.io to stream or download. \
        Tap {} next to a result for movie details.\n\n\
        How to use the torrent files with webtor.io:\n\
        1. Save the torrent file I send you\n\
        2. Go to webtor.io in your browser\n\
        3. Click 'Open Torrent' and upload the file I sent you\n\
        4. Click 'Open' when the file appears\n\
        5. Wait for it to load (this takes a moment)\n\
        6. Press the play button to watch directly in your browser or use download options\n\
        7. No torrent client or additional software needed!\n\n\
        {}",
        emoji::SEARCH,
        emoji::INFO,
        commands
    )
}

pub fn searching_text(request: &SearchRequest) -> String {
    let quality = request
        .quality
        .as_deref()
        .map(|q| format!(" (Quality: {})", q))
        .unwrap_or_default();

    format!(
        "{} Searching for movies with query: '{}'{}...\nThis may take a moment.",
        emoji::SEARCH,
        request.query,
        quality
    )
}

pub fn no_results_text(query: &str) -> String {
    format!(
        "{} No results found for '{}'.\n\nTry a different search term.",
        emoji::ERROR,
        query
    )
}

pub fn results_header(count: usize, query: &str) -> String {
    format!("{} Found {} results for '{}':\n\n", emoji::SEARCH, count, query)
}

fn result_summary(result: &SearchResult) -> String {
    format!("Quality: {}\nSize: {}", result.quality, result.size)
}

pub fn preparing_text(result: &SearchResult) -> String {
    format!(
        "{} Preparing torrent file for: {}\n{}\n\nPlease wait, this may take a moment...",
        emoji::WAIT,
        result.title,
        result_summary(result)
    )
}

pub fn sending_text(result: &SearchResult) -> String {
    format!(
        "{} Sending torrent file...\nTitle: {}\n{}",
        emoji::WAIT,
        result.title,
        result_summary(result)
    )
}

pub fn sent_text(result: &SearchResult) -> String {
    format!(
        "{} Torrent file sent!\nTitle: {}\n{}",
        emoji::SUCCESS,
        result.title,
        result_summary(result)
    )
}

pub fn download_failed_text(error: &str) -> String {
    format!(
        "{} Failed to download torrent file: {}\n\nPlease try another movie or search again.",
        emoji::ERROR,
        error
    )
}

pub fn send_failed_text(error: &str) -> String {
    format!(
        "{} Error sending torrent file: {}\n\nPlease try another movie.",
        emoji::ERROR,
        error
    )
}

/// Caption attached to the sent torrent document
pub fn file_caption(result: &SearchResult) -> String {
    format!(
        "{} Movie: {}\nQuality: {}\n\n\
        📱 How to watch:\n\
        1. Save this torrent file\n\
        2. Go to webtor.io in your browser\n\
        3. Click 'Open Torrent' and upload this file\n\
        4. Click 'Open' and wait for loading\n\
        5. Enjoy your movie directly in the browser!",
        emoji::MOVIE,
        result.title,
        result.quality
    )
}

/// Format detailed movie information
pub fn format_movie_details(details: &MovieDetails, result: &SearchResult, magnet: &str) -> String {
    let year = details
        .year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "Unknown".to_string());
    let genres = if details.genres.is_empty() {
        "Unknown".to_string()
    } else {
        details.genres.join(", ")
    };
    let description = if details.description_full.trim().is_empty() {
        "No description available".to_string()
    } else {
        utils::ellipsize(details.description_full.trim(), DESCRIPTION_LENGTH)
    };

    let mut text = format!(
        "{} {}\n\n\
        Year: {}\n\
        {} Rating: {}/10\n\
        Runtime: {}\n\
        Genres: {}\n\
        Uploaded: {}\n\
        Selected: {} ({}, {} seeds)\n\n\
        {}\n",
        emoji::MOVIE,
        details.title_long,
        year,
        emoji::STAR,
        details.rating,
        utils::format_runtime(details.runtime),
        genres,
        utils::format_date(details.date_uploaded_unix),
        result.quality,
        result.size,
        result.seeds,
        description
    );

    if !details.cast.is_empty() {
        text.push_str("\nCast:\n");
        for actor in details.cast.iter().take(MAX_CAST_DISPLAY) {
            match actor.character_name.as_deref() {
                Some(role) if !role.is_empty() => {
                    text.push_str(&format!("- {} as {}\n", actor.name, role))
                }
                _ => text.push_str(&format!("- {}\n", actor.name)),
            }
        }
    }

    if !magnet.is_empty() {
        text.push_str(&format!("\n{} Magnet link:\n{}", emoji::FOLDER, magnet));
    }

    text
}
