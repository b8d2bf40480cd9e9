//! Inline keyboard builders for search results and sent files

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use torrent::{MediaType, SearchResult, StreamLink};
use url::Url;

use crate::constants::{emoji, BUTTON_TITLE_LENGTH, DETAILS_PREFIX, FILE_PREFIX};
use crate::utils;

/// Label of the button that sends result `index`
pub fn result_button_text(index: usize, result: &SearchResult) -> String {
    let icon = match result.media_type {
        MediaType::Video => emoji::MOVIE,
    };

    format!(
        "{}. {} {} ({})",
        index + 1,
        icon,
        utils::truncate_chars(&result.title, BUTTON_TITLE_LENGTH),
        result.size
    )
}

/// Create a keyboard with one row per search result
///
/// Each row holds the send button and a details button.
pub fn results_keyboard(results: &[SearchResult]) -> InlineKeyboardMarkup {
    let rows = results.iter().enumerate().map(|(i, result)| {
        vec![
            InlineKeyboardButton::callback(result_button_text(i, result), format!("{}{}", FILE_PREFIX, i)),
            InlineKeyboardButton::callback(emoji::INFO, format!("{}{}", DETAILS_PREFIX, i)),
        ]
    });

    InlineKeyboardMarkup::new(rows)
}

/// Create a single-button keyboard opening the streaming gateway
///
/// Returns `None` if the link is empty or not a valid URL.
pub fn stream_keyboard(streaming_link: &str) -> Option<InlineKeyboardMarkup> {
    let url = Url::parse(streaming_link).ok()?;
    let button = InlineKeyboardButton::url(format!("{} Stream on webtor.io", emoji::STREAM), url);
    Some(InlineKeyboardMarkup::new(vec![vec![button]]))
}

/// One streaming button per available quality
pub fn stream_links_keyboard(links: &[StreamLink]) -> Option<InlineKeyboardMarkup> {
    let rows: Vec<Vec<InlineKeyboardButton>> = links
        .iter()
        .filter_map(|link| {
            let url = Url::parse(&link.url).ok()?;
            let text = format!("{} Stream {} ({})", emoji::STREAM, link.quality, link.size);
            Some(vec![InlineKeyboardButton::url(text, url)])
        })
        .collect();

    if rows.is_empty() {
        None
    } else {
        Some(InlineKeyboardMarkup::new(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::InlineKeyboardButtonKind;

    fn result(title: &str) -> SearchResult {
        SearchResult {
            title: title.to_string(),
            url: String::new(),
            size: "1.85 GB".to_string(),
            media_type: MediaType::Video,
            seeds: 1,
            quality: "1080p".to_string(),
            hash: "ABC".to_string(),
            thumbnail: None,
            movie_id: 1,
            movie_url: String::new(),
        }
    }

    #[test]
    fn test_result_button_text() {
        let text = result_button_text(0, &result("Inception (2010) (2010) - 1080p [Rating: 8.8]"));
        assert_eq!(text, "1. 🎬 Inception (2010) (2010) - 1080 (1.85 GB)");

        let text = result_button_text(4, &result("Heat"));
        assert_eq!(text, "5. 🎬 Heat (1.85 GB)");
    }

    #[test]
    fn test_results_keyboard() {
        let keyboard = results_keyboard(&[result("A"), result("B"), result("C")]);
        assert_eq!(keyboard.inline_keyboard.len(), 3);

        let row = &keyboard.inline_keyboard[2];
        assert_eq!(row.len(), 2);
        match &row[0].kind {
            InlineKeyboardButtonKind::CallbackData(data) => assert_eq!(data, "file_2"),
            _ => panic!("Expected callback button"),
        }
        match &row[1].kind {
            InlineKeyboardButtonKind::CallbackData(data) => assert_eq!(data, "details_2"),
            _ => panic!("Expected callback button"),
        }
    }

    #[test]
    fn test_results_keyboard_empty() {
        assert!(results_keyboard(&[]).inline_keyboard.is_empty());
    }

    #[test]
    fn test_stream_keyboard() {
        let link = torrent::streaming_link("ABC", "Heat");
        let keyboard = stream_keyboard(&link).unwrap();
        match &keyboard.inline_keyboard[0][0].kind {
            InlineKeyboardButtonKind::Url(url) => assert!(url.as_str().starts_with("https://webtor.io/")),
            _ => panic!("Expected URL button"),
        }

        assert!(stream_keyboard("").is_none());
    }

    #[test]
    fn test_stream_links_keyboard() {
        let link = |quality: &str, url: String| StreamLink {
            title: "Heat".to_string(),
            quality: quality.to_string(),
            size: "2 GB".to_string(),
            url,
            magnet: String::new(),
        };

        let keyboard = stream_links_keyboard(&[
            link("720p", torrent::streaming_link("AAA", "Heat")),
            link("1080p", String::new()),
            link("2160p", torrent::streaming_link("BBB", "Heat")),
        ])
        .unwrap();

        assert_eq!(keyboard.inline_keyboard.len(), 2);
        assert_eq!(keyboard.inline_keyboard[1][0].text, "▶️ Stream 2160p (2 GB)");
        assert!(stream_links_keyboard(&[]).is_none());
    }
}
