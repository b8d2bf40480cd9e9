//! Utility functions for torrent operations

use sha1::{Digest, Sha1};

/// Check whether data looks like a bencoded dictionary
pub fn is_bencoded_dict(data: &[u8]) -> bool {
    data.first() == Some(&b'd') && data.last() == Some(&b'e')
}

/// Extract info hash from .torrent file data
///
/// Returns the lowercase hex SHA-1 of the bencoded info dictionary.
pub fn torrent_info_hash(data: &[u8]) -> Option<String> {
    let start = find_info_dict_start(data)?;
    let end = find_matching_end(data, start)?;

    let mut hasher = Sha1::new();
    hasher.update(&data[start..end]);
    Some(format!("{:x}", hasher.finalize()))
}

/// Compare two info hashes ignoring case
pub fn same_info_hash(a: &str, b: &str) -> bool {
    !a.is_empty() && a.eq_ignore_ascii_case(b)
}

/// Position of the `d` opening the value of the `info` key
fn find_info_dict_start(data: &[u8]) -> Option<usize> {
    const PATTERN: &[u8] = b"4:infod";
    data.windows(PATTERN.len())
        .position(|window| window == PATTERN)
        .map(|i| i + PATTERN.len() - 1)
}

/// Find the end (exclusive) of the bencoded value starting at `start`
///
/// Walks the structure properly so string payloads containing `d`, `l`
/// or `e` bytes (piece hashes) do not confuse the depth count.
fn find_matching_end(data: &[u8], start: usize) -> Option<usize> {
    if data.get(start) != Some(&b'd') {
        return None;
    }

    let mut depth = 0usize;
    let mut pos = start;
    while pos < data.len() {
        match data[pos] {
            b'd' | b'l' => {
                depth += 1;
                pos += 1;
            }
            b'e' => {
                depth = depth.checked_sub(1)?;
                pos += 1;
                if depth == 0 {
                    return Some(pos);
                }
            }
            b'i' => {
                let len = data[pos..].iter().position(|&b| b == b'e')?;
                pos += len + 1;
            }
            b'0'..=b'9' => {
                let colon = data[pos..].iter().position(|&b| b == b':')?;
                let len: usize = std::str::from_utf8(&data[pos..pos + colon])
                    .ok()?
                    .parse()
                    .ok()?;
                pos = pos.saturating_add(colon + 1).saturating_add(len);
            }
            _ => return None,
        }
    }
    None
}
