//! Selector fallback chains and text helpers shared by the parsers
//!
//! A chain is an ordered list of CSS selectors. Each selector is tried in
//! turn and the first one that yields a usable value wins. An invalid
//! selector is skipped rather than reported, since field extraction is
//! best effort.

use std::collections::HashSet;

use scraper::{ElementRef, Selector};

/// Returns the first element matched by any selector in the chain
pub fn first_element<'a>(scope: ElementRef<'a>, chain: &[&str]) -> Option<ElementRef<'a>> {
    chain
        .iter()
        .filter_map(|css| Selector::parse(css).ok())
        .find_map(|selector| scope.select(&selector).next())
}

/// Walks the chain and returns the first value `extract` accepts
///
/// Every element matched by a selector is offered to `extract` before
/// moving on to the next selector.
pub fn first_match<'a, T>(
    scope: ElementRef<'a>,
    chain: &[&str],
    mut extract: impl FnMut(ElementRef<'a>) -> Option<T>,
) -> Option<T> {
    for css in chain {
        let Ok(selector) = Selector::parse(css) else {
            continue;
        };
        if let Some(value) = scope.select(&selector).find_map(&mut extract) {
            return Some(value);
        }
    }
    None
}

/// Collects every element matched by a single selector
pub fn select_all<'a>(scope: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => scope.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

/// Trimmed, non-empty text fragments of an element in document order
pub fn text_fragments<'a>(element: ElementRef<'a>) -> impl Iterator<Item = &'a str> {
    element.text().map(str::trim).filter(|s| !s.is_empty())
}

/// Text of an element with fragments trimmed and joined by single spaces
pub fn joined_text(element: ElementRef<'_>) -> String {
    text_fragments(element).collect::<Vec<_>>().join(" ")
}

/// Non-empty trimmed text, for use as a `first_match` extractor
pub fn non_empty_text(element: ElementRef<'_>) -> Option<String> {
    let text = joined_text(element);
    (!text.is_empty()).then_some(text)
}

/// Drops empty strings and repeats, keeping the first occurrence
pub fn unique_preserve_order<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| !item.is_empty() && seen.insert(item.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use scraper::Html;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_unique_preserve_order() {
        let result = unique_preserve_order(strings(&["A", "B", "A", "C"]));
        assert_eq!(result, strings(&["A", "B", "C"]));
    }

    #[test]
    fn test_unique_drops_empty() {
        let result = unique_preserve_order(strings(&["", "A", "", "A"]));
        assert_eq!(result, strings(&["A"]));
    }

    #[test]
    fn test_joined_text_collapses_fragments() {
        let doc = Html::parse_fragment("<div>\n  Hello <b> big </b>\n\n world  </div>");
        let div = first_element(doc.root_element(), &["div"]).unwrap();
        assert_eq!(joined_text(div), "Hello big world");
    }

    #[test]
    fn test_first_element_falls_back() {
        let doc = Html::parse_fragment(r#"<p class="b">second</p>"#);
        let el = first_element(doc.root_element(), &["p.a", "p.b"]).unwrap();
        assert_eq!(joined_text(el), "second");
    }

    #[test]
    fn test_first_match_skips_empty_candidates() {
        let doc = Html::parse_fragment(r#"<p class="a">  </p><p class="b">value</p>"#);
        let text = first_match(doc.root_element(), &["p.a", "p.b"], non_empty_text);
        assert_eq!(text, Some("value".to_string()));
    }

    #[test]
    fn test_invalid_selector_is_skipped() {
        let doc = Html::parse_fragment(r#"<p class="b">value</p>"#);
        let text = first_match(doc.root_element(), &["p[[", "p.b"], non_empty_text);
        assert_eq!(text, Some("value".to_string()));
        assert!(select_all(doc.root_element(), "p[[").is_empty());
    }

    proptest! {
        #[test]
        fn prop_unique_has_no_repeats(items in proptest::collection::vec("[a-c]{0,2}", 0..20)) {
            let result = unique_preserve_order(items.clone());
            let set: HashSet<&String> = result.iter().collect();
            prop_assert_eq!(set.len(), result.len());
            prop_assert!(result.iter().all(|s| !s.is_empty()));

            // first occurrences keep their relative order
            let mut expected = Vec::new();
            for item in items {
                if !item.is_empty() && !expected.contains(&item) {
                    expected.push(item);
                }
            }
            prop_assert_eq!(result, expected);
        }
    }
}
