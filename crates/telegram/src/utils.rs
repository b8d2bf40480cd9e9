//! Utility functions for formatting and parsing

use crate::constants::{DETAILS_PREFIX, FILE_PREFIX, MAX_CALLBACK_DATA_LEN, QUALITY_TOKENS};
use crate::types::{CallbackAction, SearchRequest};

/// Split a search message into query and quality filter
///
/// The first quality token found anywhere in the text (case-insensitive)
/// becomes the filter and is removed; the remaining query is then
/// lowercased. Whitespace is collapsed.
pub fn parse_search_text(text: &str) -> SearchRequest {
    let lower = text.to_lowercase();

    for token in QUALITY_TOKENS {
        if lower.contains(token) {
            return SearchRequest {
                query: collapse_whitespace(&lower.replace(token, " ")),
                quality: Some(token.to_string()),
            };
        }
    }

    SearchRequest {
        query: collapse_whitespace(text),
        quality: None,
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse inline button data such as `file_3` or `details_0`
pub fn parse_callback_data(data: &str) -> CallbackAction {
    if data.len() > MAX_CALLBACK_DATA_LEN {
        return CallbackAction::Unknown;
    }

    let index = |rest: &str| rest.parse::<usize>().ok();

    if let Some(i) = data.strip_prefix(FILE_PREFIX).and_then(index) {
        CallbackAction::SendFile(i)
    } else if let Some(i) = data.strip_prefix(DETAILS_PREFIX).and_then(index) {
        CallbackAction::Details(i)
    } else {
        CallbackAction::Unknown
    }
}

/// Truncate text to at most `max` characters
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Truncate text to `max` characters, appending an ellipsis when cut
pub fn ellipsize(text: &str, max: usize) -> String {
    let cut = truncate_chars(text, max);
    if cut.len() < text.len() {
        format!("{}…", cut.trim_end())
    } else {
        text.to_string()
    }
}

/// Format Unix timestamp to a calendar date
pub fn format_date(timestamp: i64) -> String {
    if timestamp <= 0 {
        return "N/A".to_string();
    }

    use chrono::{TimeZone, Utc};
    match Utc.timestamp_opt(timestamp, 0) {
        chrono::LocalResult::Single(dt) => dt.format("%Y-%m-%d").to_string(),
        _ => "Invalid".to_string(),
    }
}

/// Format runtime in minutes as hours and minutes
pub fn format_runtime(minutes: u32) -> String {
    if minutes == 0 {
        return "N/A".to_string();
    }

    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}

/// Make a title safe to use as a file name
pub fn sanitize_filename(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        "movie".to_string()
    } else {
        truncate_chars(cleaned, 100).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(query: &str, quality: Option<&str>) -> SearchRequest {
        SearchRequest {
            query: query.to_string(),
            quality: quality.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_search_text() {
        assert_eq!(parse_search_text("Avengers"), request("Avengers", None));
        assert_eq!(parse_search_text("  The   Matrix "), request("The Matrix", None));
        assert_eq!(parse_search_text("720p Avengers"), request("avengers", Some("720p")));
        assert_eq!(parse_search_text("The Matrix 1080P"), request("the matrix", Some("1080p")));
        assert_eq!(parse_search_text("Dune 2160p"), request("dune", Some("2160p")));
        assert_eq!(parse_search_text("Inception1080p"), request("inception", Some("1080p")));
    }

    #[test]
    fn test_parse_search_text_first_token_wins() {
        assert_eq!(
            parse_search_text("1080p Heat 720p"),
            request("1080p heat", Some("720p"))
        );
    }

    #[test]
    fn test_parse_search_text_only_quality() {
        assert_eq!(parse_search_text("720p"), request("", Some("720p")));
        assert_eq!(parse_search_text("   "), request("", None));
    }

    #[test]
    fn test_parse_callback_data() {
        assert_eq!(parse_callback_data("file_0"), CallbackAction::SendFile(0));
        assert_eq!(parse_callback_data("file_9"), CallbackAction::SendFile(9));
        assert_eq!(parse_callback_data("details_3"), CallbackAction::Details(3));
        assert_eq!(parse_callback_data("file_"), CallbackAction::Unknown);
        assert_eq!(parse_callback_data("file_x"), CallbackAction::Unknown);
        assert_eq!(parse_callback_data("file_-1"), CallbackAction::Unknown);
        assert_eq!(parse_callback_data("page:1"), CallbackAction::Unknown);
        assert_eq!(parse_callback_data(""), CallbackAction::Unknown);

        let long = format!("file_{}", "1".repeat(MAX_CALLBACK_DATA_LEN));
        assert_eq!(parse_callback_data(&long), CallbackAction::Unknown);
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abcdefgh", 4), "abcd");
        assert_eq!(truncate_chars("abc", 4), "abc");
        assert_eq!(truncate_chars("", 4), "");
        assert_eq!(truncate_chars("Amélie (2001)", 5), "Améli");
        assert_eq!(truncate_chars("千と千尋の神隠し", 3), "千と千");
    }

    #[test]
    fn test_ellipsize() {
        assert_eq!(ellipsize("short", 10), "short");
        assert_eq!(ellipsize("a long description", 6), "a long…");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(0), "N/A");
        assert_eq!(format_date(-1), "N/A");
        assert_eq!(format_date(1704067200), "2024-01-01");
    }

    #[test]
    fn test_format_runtime() {
        assert_eq!(format_runtime(0), "N/A");
        assert_eq!(format_runtime(45), "45m");
        assert_eq!(format_runtime(60), "1h 0m");
        assert_eq!(format_runtime(148), "2h 28m");
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Heat (1995) - 720p"), "Heat (1995) - 720p");
        assert_eq!(sanitize_filename("Face/Off: 1080p"), "Face_Off_ 1080p");
        assert_eq!(sanitize_filename("  "), "movie");
    }
}
