//! URL helper functions for bangumi
//!
//! Resolves user input into a subject page URL and builds search URLs.
//! Nothing here touches the network.

use regex::Regex;

/// Default catalog site
pub const BASE_URL: &str = "https://chii.in";

/// A subject page to fetch, with the id that goes into the record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectTarget {
    /// Page URL to request
    pub url: String,

    /// Subject id, or the raw input when no id could be found
    pub id: String,
}

/// Resolves an id or URL against the default base URL
///
/// # Example
/// ```
/// use bangumi_core::url::resolve_subject;
/// let target = resolve_subject("9912");
/// assert_eq!(target.url, "https://chii.in/subject/9912");
/// assert_eq!(target.id, "9912");
/// ```
pub fn resolve_subject(input: &str) -> SubjectTarget {
    resolve_subject_with_base(input, BASE_URL)
}

/// Resolves an id or URL into a [`SubjectTarget`]
///
/// * All-digit input is treated as a bare id and expanded to
///   `{base}/subject/{id}`.
/// * Anything else is used as the URL unchanged; the id is taken from a
///   `/subject/<digits>` segment, or is the raw input if there is none.
///
/// # Example
/// ```
/// use bangumi_core::url::resolve_subject_with_base;
/// let target = resolve_subject_with_base("https://bgm.tv/subject/9912?x=1", "https://chii.in");
/// assert_eq!(target.url, "https://bgm.tv/subject/9912?x=1");
/// assert_eq!(target.id, "9912");
/// ```
pub fn resolve_subject_with_base(input: &str, base: &str) -> SubjectTarget {
    if is_bare_id(input) {
        return SubjectTarget {
            url: build_subject_url_with_base(input, base),
            id: input.to_string(),
        };
    }

    let id = extract_subject_id(input).unwrap_or_else(|| {
        tracing::warn!(input, "no /subject/<id> segment found, using raw input as id");
        input.to_string()
    });

    SubjectTarget {
        url: input.to_string(),
        id,
    }
}

/// Builds the subject page URL for an id
///
/// # Example
/// ```
/// use bangumi_core::url::build_subject_url;
/// assert_eq!(build_subject_url("9912"), "https://chii.in/subject/9912");
/// ```
pub fn build_subject_url(id: &str) -> String {
    build_subject_url_with_base(id, BASE_URL)
}

pub fn build_subject_url_with_base(id: &str, base: &str) -> String {
    format!("{}/subject/{}", base.trim_end_matches('/'), id)
}

/// Builds the anime search URL for a keyword
///
/// # Example
/// ```
/// use bangumi_core::url::build_search_url;
/// let url = build_search_url("kimi no na wa");
/// assert_eq!(url, "https://chii.in/subject_search/kimi%20no%20na%20wa?cat=2");
/// ```
pub fn build_search_url(keyword: &str) -> String {
    build_search_url_with_base(keyword, BASE_URL)
}

pub fn build_search_url_with_base(keyword: &str, base: &str) -> String {
    let encoded = urlencoding::encode(keyword);
    format!("{}/subject_search/{}?cat=2", base.trim_end_matches('/'), encoded)
}

/// Extracts the numeric id from a `/subject/<digits>` path segment
///
/// # Example
/// ```
/// use bangumi_core::url::extract_subject_id;
/// assert_eq!(extract_subject_id("/subject/253"), Some("253".to_string()));
/// assert_eq!(extract_subject_id("/person/253"), None);
/// ```
pub fn extract_subject_id(url: &str) -> Option<String> {
    let re = Regex::new(r"/subject/(\d+)").ok()?;
    re.captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn is_bare_id(input: &str) -> bool {
    !input.is_empty() && input.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_resolve_bare_id() {
        let target = resolve_subject("9912");
        assert_eq!(target.url, "https://chii.in/subject/9912");
        assert_eq!(target.id, "9912");
    }

    #[test]
    fn test_resolve_full_url_kept_unchanged() {
        let target = resolve_subject("https://bgm.tv/subject/12345/ep?page=2");
        assert_eq!(target.url, "https://bgm.tv/subject/12345/ep?page=2");
        assert_eq!(target.id, "12345");
    }

    #[test]
    fn test_resolve_without_subject_segment() {
        let target = resolve_subject("https://chii.in/anime/browser");
        assert_eq!(target.url, "https://chii.in/anime/browser");
        assert_eq!(target.id, "https://chii.in/anime/browser");
    }

    #[test]
    fn test_resolve_empty_input() {
        let target = resolve_subject("");
        assert_eq!(target.url, "");
        assert_eq!(target.id, "");
    }

    #[test]
    fn test_resolve_with_custom_base() {
        let target = resolve_subject_with_base("42", "http://127.0.0.1:8080/");
        assert_eq!(target.url, "http://127.0.0.1:8080/subject/42");
    }

    #[test]
    fn test_build_search_url_encodes_keyword() {
        assert_eq!(
            build_search_url("日常"),
            "https://chii.in/subject_search/%E6%97%A5%E5%B8%B8?cat=2"
        );
    }

    #[test]
    fn test_extract_subject_id_ignores_non_digits() {
        assert_eq!(extract_subject_id("/subject/abc"), None);
        assert_eq!(
            extract_subject_id("https://chii.in/subject/9912#comments"),
            Some("9912".to_string())
        );
    }

    proptest! {
        #[test]
        fn prop_digits_resolve_to_themselves(id in "[0-9]{1,12}") {
            let target = resolve_subject(&id);
            prop_assert_eq!(&target.id, &id);
            prop_assert_eq!(target.url, format!("{}/subject/{}", BASE_URL, id));
        }

        #[test]
        fn prop_subject_segment_wins(
            prefix in "https?://[a-z]{1,10}\\.[a-z]{2,3}",
            suffix in "(/[a-z]{0,8})?(\\?[a-z]=[a-z0-9]{0,5})?",
        ) {
            let url = format!("{}/subject/12345{}", prefix, suffix);
            let target = resolve_subject(&url);
            prop_assert_eq!(target.id, "12345");
            prop_assert_eq!(target.url, url);
        }
    }
}
