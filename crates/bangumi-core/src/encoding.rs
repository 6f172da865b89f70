//! Response body decoding
//!
//! Picks a character set from the `Content-Type` header, then from a
//! `<meta>` declaration near the top of the page, and falls back to UTF-8.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

/// Decodes a response body into a `String`
///
/// Undecodable bytes become U+FFFD instead of failing the fetch.
pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> String {
    let encoding = detect_encoding(bytes, content_type);
    tracing::debug!(encoding = encoding.name(), "decoding response body");

    let (decoded, _used, _had_errors) = encoding.decode(bytes);
    decoded.into_owned()
}

/// Detects the character encoding of a page
///
/// A byte order mark is honored by [`Encoding::decode`] itself, so only
/// declared charsets are considered here.
pub fn detect_encoding(bytes: &[u8], content_type: Option<&str>) -> &'static Encoding {
    if let Some(encoding) = content_type
        .and_then(charset_from_content_type)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
    {
        return encoding;
    }

    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(1024)]);
    if let Some(encoding) =
        charset_from_meta(&head).and_then(|label| Encoding::for_label(label.as_bytes()))
    {
        return encoding;
    }

    UTF_8
}

fn charset_from_content_type(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .skip(1)
        .filter_map(|param| param.split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("charset"))
        .map(|(_, value)| value.trim().trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}

/// Matches both `<meta charset=..>` and the `http-equiv` content form
fn charset_from_meta(head: &str) -> Option<String> {
    let re = Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s/>;]+)"#).ok()?;
    re.captures(head)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
