//! Search results parser for bangumi
//!
//! Parses HTML from the subject search page and extracts lightweight
//! candidates for the interactive picker.

use scraper::{ElementRef, Html};

use super::select::{first_element, joined_text, select_all};
use crate::types::SearchResult;
use crate::url::extract_subject_id;

const RESULT_ITEMS: &str = "#browserItemList > li";
const TITLE_LINK_CHAIN: &[&str] = &["h3 > a.l", "h3 a"];
const SUBTITLE_CHAIN: &[&str] = &["h3 > small.grey", "h3 small"];

/// Parses search results HTML and returns a list of candidates
///
/// # Arguments
/// * `html` - Raw HTML string from the search results page
///
/// # Returns
/// One `SearchResult` per result item that has a title link, in page
/// order. Empty if the page has no result list.
pub fn parse_search_results(html: &str) -> Vec<SearchResult> {
    let document = Html::parse_document(html);

    let results: Vec<SearchResult> = select_all(document.root_element(), RESULT_ITEMS)
        .into_iter()
        .filter_map(parse_result_item)
        .collect();

    tracing::debug!(count = results.len(), "parsed search results");
    results
}

/// Parses a single result item
///
/// # Returns
/// `None` if the item has no title link
fn parse_result_item(item: ElementRef) -> Option<SearchResult> {
    let link = first_element(item, TITLE_LINK_CHAIN)?;

    let id = link
        .value()
        .attr("href")
        .and_then(extract_subject_id)
        .unwrap_or_default();

    let subtitle = first_element(item, SUBTITLE_CHAIN)
        .map(joined_text)
        .unwrap_or_default();

    Some(SearchResult {
        id,
        title: joined_text(link),
        subtitle,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_html() {
        let results = parse_search_results("<html><body></body></html>");
        assert!(results.is_empty());
    }

    #[test]
    fn test_parse_search_results_skips_items_without_link() {
        let html = r#"
        <html>
        <body>
        <ul id="browserItemList" class="browserFull">
            <li id="item_9912" class="item odd clearit">
                <a href="/subject/9912" class="subjectCover cover ll"><img src="//lain.bgm.tv/pic/cover/s/1.jpg" /></a>
                <div class="inner">
                    <h3>
                        <a href="/subject/9912" class="l">日常</a>
                        <small class="grey">日常</small>
                    </h3>
                    <p class="info tip">26话 / 2011年4月2日</p>
                </div>
            </li>
            <li id="item_broken" class="item even clearit">
                <div class="inner"><p class="info tip">no title here</p></div>
            </li>
            <li id="item_2" class="item odd clearit">
                <div class="inner">
                    <h3><a href="/subject/2" class="l">Second</a></h3>
                </div>
            </li>
        </ul>
        </body>
        </html>
        "#;

        let results = parse_search_results(html);
        assert_eq!(results.len(), 2);

        assert_eq!(results[0].id, "9912");
        assert_eq!(results[0].title, "日常");
        assert_eq!(results[0].subtitle, "日常");

        assert_eq!(results[1].id, "2");
        assert_eq!(results[1].title, "Second");
        assert_eq!(results[1].subtitle, "");
    }

    #[test]
    fn test_unparseable_href_gives_empty_id() {
        let html = r#"
        <ul id="browserItemList">
            <li class="item"><h3><a href="/person/7" class="l">Somebody</a></h3></li>
            <li class="item"><h3><a class="l">No href</a></h3></li>
        </ul>
        "#;

        let results = parse_search_results(html);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, "");
        assert_eq!(results[0].title, "Somebody");
        assert_eq!(results[1].id, "");
    }

    #[test]
    fn test_title_link_fallback() {
        let html = r#"
        <ul id="browserItemList">
            <li class="item"><h3><span><a href="/subject/5">Nested</a></span></h3></li>
        </ul>
        "#;

        let results = parse_search_results(html);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "5");
        assert_eq!(results[0].title, "Nested");
    }
}
