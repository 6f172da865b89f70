//! Subject page parser for bangumi
//!
//! Extracts a [`SubjectRecord`] from a subject detail page. Every field is
//! extracted independently; a missing element only blanks its own field.

use regex::Regex;
use scraper::{ElementRef, Html};

use super::select::{
    first_element, first_match, joined_text, non_empty_text, select_all, text_fragments,
    unique_preserve_order,
};
use crate::types::{SubjectRecord, WatchStatus};

// ---------------------------------------------------------------------------
// Selector chains
// ---------------------------------------------------------------------------

const TITLE_CHAIN: &[&str] = &["#headerSubject > h1 > a", "h1.nameSingle a"];
const SUMMARY_CHAIN: &[&str] = &["#subject_summary"];
const COVER_CHAIN: &[&str] = &["#bangumiInfo .infobox img", ".infobox img"];
const RATING_CHAIN: &[&str] = &[
    ".global_score .number",
    ".global_rating .number",
    ".global_score",
    ".global_rating",
];
const INFOBOX_ITEMS: &str = "#infobox li";
const ALIAS_ITEMS: &str = "#infobox .sub_container ul li";
const TAG_LINKS: &str = ".subject_tag_section .inner a";

// Info box labels
const EPISODES_LABELS: &[&str] = &["话数"];
const YEAR_LABELS: &[&str] = &["放送开始", "首播", "上映年度", "发售日"];
const CHINESE_NAME_LABELS: &[&str] = &["中文名"];

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Parses a subject page into a record
///
/// # Arguments
/// * `html` - Raw HTML of the subject page
/// * `id` - Subject id as resolved from the user input
/// * `status` - Watch status chosen by the caller
///
/// # Returns
/// A fully populated record. Fields the page does not provide are left
/// empty, zero, or `None` (rating).
pub fn parse_subject(html: &str, id: &str, status: WatchStatus) -> SubjectRecord {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let facts = extract_infobox(root);
    let record = SubjectRecord {
        id: id.to_string(),
        main_title: extract_title(root),
        other_title: extract_other_titles(root, facts.chinese_name.as_deref()),
        year: facts.year.unwrap_or(0),
        episodes: facts.episodes.unwrap_or(0),
        rating: extract_rating(root),
        tags: extract_tags(root),
        cover: extract_cover(root),
        status,
        desc: extract_description(root),
    };

    tracing::debug!(
        id = %record.id,
        title = %record.main_title,
        year = record.year,
        episodes = record.episodes,
        rating = ?record.rating,
        tags = record.tags.len(),
        "parsed subject page"
    );
    record
}

// ---------------------------------------------------------------------------
// Header fields
// ---------------------------------------------------------------------------

fn extract_title(root: ElementRef) -> String {
    first_match(root, TITLE_CHAIN, non_empty_text).unwrap_or_default()
}

fn extract_description(root: ElementRef) -> String {
    first_element(root, SUMMARY_CHAIN)
        .map(joined_text)
        .unwrap_or_default()
}

fn extract_cover(root: ElementRef) -> String {
    first_match(root, COVER_CHAIN, |img| {
        let src = img.value().attr("src")?.trim();
        (!src.is_empty()).then(|| absolutize(src))
    })
    .unwrap_or_default()
}

/// Gives protocol-relative URLs an explicit https scheme
fn absolutize(url: &str) -> String {
    if url.starts_with("//") {
        format!("https:{}", url)
    } else {
        url.to_string()
    }
}

/// Reads the score from the first rating element found
///
/// Later candidates are not consulted once an element matched, even if
/// it holds no number.
fn extract_rating(root: ElementRef) -> Option<f64> {
    let element = first_element(root, RATING_CHAIN)?;
    parse_rating(&joined_text(element))
}

fn parse_rating(text: &str) -> Option<f64> {
    let re = Regex::new(r"[0-9]+(?:\.[0-9]+)?").ok()?;
    re.find(&fold_fullwidth_digits(text))?.as_str().parse().ok()
}

// ---------------------------------------------------------------------------
// Info box
// ---------------------------------------------------------------------------

/// Facts read from the info box list
#[derive(Debug, Default, PartialEq)]
struct InfoboxFacts {
    year: Option<u32>,
    episodes: Option<u32>,
    chinese_name: Option<String>,
}

/// Scans every info box item once; a later item overwrites an earlier
/// one with the same label.
fn extract_infobox(root: ElementRef) -> InfoboxFacts {
    let mut facts = InfoboxFacts::default();

    for item in select_all(root, INFOBOX_ITEMS) {
        let label = first_element(item, &["span.tip"])
            .map(|tip| text_fragments(tip).collect::<String>())
            .unwrap_or_default();
        let value = text_excluding_label(item, &label);

        if contains_any(&label, EPISODES_LABELS) {
            if let Some(episodes) = first_number(&value, r"[0-9]+") {
                facts.episodes = Some(episodes);
            }
        } else if contains_any(&label, YEAR_LABELS) {
            if let Some(year) = first_number(&value, r"[0-9]{4}") {
                facts.year = Some(year);
            }
        } else if contains_any(&label, CHINESE_NAME_LABELS) {
            facts.chinese_name = (!value.is_empty()).then_some(value);
        }
    }

    facts
}

/// Item text without the label fragment and stray colons
fn text_excluding_label(item: ElementRef, label: &str) -> String {
    text_fragments(item)
        .filter(|fragment| label.is_empty() || *fragment != label)
        .filter(|fragment| !matches!(*fragment, ":" | "："))
        .collect::<Vec<_>>()
        .join(" ")
}

fn contains_any(label: &str, markers: &[&str]) -> bool {
    markers.iter().any(|marker| label.contains(marker))
}

fn first_number(text: &str, pattern: &str) -> Option<u32> {
    let re = Regex::new(pattern).ok()?;
    re.find(&fold_fullwidth_digits(text))?.as_str().parse().ok()
}

/// Rewrites full-width digits (０-９) as ASCII so they parse as numbers
fn fold_fullwidth_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '０'..='９' => char::from_u32(c as u32 - '０' as u32 + '0' as u32).unwrap_or(c),
            _ => c,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Alternate titles & tags
// ---------------------------------------------------------------------------

fn extract_other_titles(root: ElementRef, chinese_name: Option<&str>) -> Vec<String> {
    let aliases = select_all(root, ALIAS_ITEMS)
        .into_iter()
        .map(|item| strip_alias_label(&joined_text(item)));

    unique_preserve_order(chinese_name.map(str::to_string).into_iter().chain(aliases))
}

/// Removes a leading `别名` label with an ASCII or full-width colon
fn strip_alias_label(text: &str) -> String {
    match Regex::new(r"^\s*别名[:：]?\s*") {
        Ok(re) => re.replace(text, "").trim().to_string(),
        Err(_) => text.trim().to_string(),
    }
}

fn extract_tags(root: ElementRef) -> Vec<String> {
    let tags = select_all(root, TAG_LINKS).into_iter().map(|link| {
        match first_element(link, &["span"]) {
            Some(span) => joined_text(span),
            None => strip_vote_count(&joined_text(link)),
        }
    });

    unique_preserve_order(tags)
}

/// Drops a trailing whitespace-separated vote count ("Comedy 1532")
fn strip_vote_count(text: &str) -> String {
    match Regex::new(r"\s+\d+\s*$") {
        Ok(re) => re.replace(text, "").trim().to_string(),
        Err(_) => text.trim().to_string(),
    }
}
