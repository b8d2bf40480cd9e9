//! Magnet and streaming link generation

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Trackers appended to every generated magnet link
pub const TRACKERS: [&str; 8] = [
    "udp://open.demonii.com:1337/announce",
    "udp://tracker.openbittorrent.com:80",
    "udp://tracker.coppersurfer.tk:6969",
    "udp://glotorrents.pw:6969/announce",
    "udp://tracker.opentrackr.org:1337/announce",
    "udp://torrent.gresille.org:80/announce",
    "udp://p4p.arenabg.com:1337",
    "udp://tracker.leechers-paradise.org:6969",
];

/// Browser streaming gateway, the encoded magnet goes after the `#`
pub const STREAMING_GATEWAY: &str = "https://webtor.io/#";

/// Build a magnet link for a torrent hash
///
/// The display name is base64 encoded so titles never break the URI.
/// Returns an empty string when `hash` is empty.
pub fn magnet_link(hash: &str, title: &str) -> String {
    if hash.is_empty() {
        return String::new();
    }

    let trackers = TRACKERS
        .iter()
        .map(|tracker| format!("tr={}", tracker))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "magnet:?xt=urn:btih:{}&dn={}&{}",
        hash,
        STANDARD.encode(title.as_bytes()),
        trackers
    )
}

/// Build a webtor.io link that streams the torrent in the browser
///
/// Returns an empty string when `hash` is empty.
pub fn streaming_link(hash: &str, title: &str) -> String {
    let magnet = magnet_link(hash, title);
    if magnet.is_empty() {
        return String::new();
    }

    format!("{}{}", STREAMING_GATEWAY, urlencoding::encode(&magnet))
}
