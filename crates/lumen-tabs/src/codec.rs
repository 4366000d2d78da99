//! Persisted tab-list format
//!
//! The blob is every non-empty URL joined by [`SEPARATOR`]. There is no
//! escaping: a URL that contains the separator itself will not survive a
//! round trip. Existing saved sessions depend on this exact format.

use url::Url;

pub const SEPARATOR: &str = "|$|SEPARATOR|$|";

const FILE_SCHEME: &str = "file";

/// Join URLs into a blob, skipping empty ones.
pub fn encode_urls<I, S>(urls: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut blob = String::new();
    for url in urls {
        let url = url.as_ref();
        if url.is_empty() {
            continue;
        }
        if !blob.is_empty() {
            blob.push_str(SEPARATOR);
        }
        blob.push_str(url);
    }
    blob
}

/// Split a blob back into URLs, dropping empty segments.
///
/// Older writers left a trailing separator after every URL; that form decodes
/// the same way.
pub fn decode_urls(blob: &str) -> Vec<String> {
    blob.split(SEPARATOR)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect()
}

/// Whether opening `url` needs the user to confirm local file access.
pub fn is_local_file_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => parsed.scheme() == FILE_SCHEME,
        Err(_) => url
            .get(..FILE_SCHEME.len() + 3)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("file://")),
    }
}
