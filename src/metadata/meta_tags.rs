//! HTML `<meta>` tag extraction.
//!
//! Reads Open Graph, Twitter card, Dublin Core and common publisher-specific
//! tags. Only the first usable value per field is kept.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use dom_query::{Document, Selection};

use super::ArticleMetadata;
use crate::dom;
use crate::Options;

/// Examine `<meta>` tags for title, byline and publication date.
#[must_use]
pub fn examine_meta(doc: &Document, original: ArticleMetadata, _opts: &Options) -> ArticleMetadata {
    let mut result = original;

    for node in doc.select("meta").nodes() {
        let meta = Selection::from(*node);

        let name = dom::get_attribute(&meta, "property")
            .or_else(|| dom::get_attribute(&meta, "name"))
            .or_else(|| dom::get_attribute(&meta, "itemprop"))
            .unwrap_or_default()
            .trim()
            .to_lowercase();
        let content = dom::get_attribute(&meta, "content").unwrap_or_default();
        let content = content.trim();

        if name.is_empty() || content.is_empty() {
            continue;
        }

        match name.as_str() {
            "og:title" | "twitter:title" | "dc.title" | "dcterms.title" | "sailthru.title"
            | "parsely-title" | "headline" => {
                if result.title.is_none() {
                    result.title = Some(content.to_string());
                }
            }

            "author" | "article:author" | "dc.creator" | "dcterms.creator" | "byl"
            | "sailthru.author" | "parsely-author" | "twitter:creator" => {
                if result.byline.is_none() && validate_metadata_name(content) {
                    result.byline = Some(content.to_string());
                }
            }

            "article:published_time" | "og:article:published_time" | "article:published"
            | "article.published" | "article:created" | "article.created" | "date"
            | "dc.date" | "dc.date.issued" | "dcterms.date" | "dcterms.created"
            | "dcterms.issued" | "datepublished" | "sailthru.date" | "parsely-pub-date"
            | "pubdate" | "publish_date" | "publishdate" | "publication_date"
            | "cxenseparse:recs:publishtime" => {
                if result.publication_datetime.is_none() {
                    result.publication_datetime = parse_meta_date(content);
                }
            }

            _ => {}
        }
    }

    result
}

/// Validate that a metadata name looks like a real author name.
///
/// Filters out:
/// - Empty, very short or very long values
/// - URLs and JSON blobs
/// - Identifiers (many digits) and strings full of punctuation
#[must_use]
pub fn validate_metadata_name(name: &str) -> bool {
    let name = name.trim();
    let len = name.chars().count();

    if !(2..=120).contains(&len) {
        return false;
    }
    if len > 20 && !name.contains(' ') {
        return false;
    }
    if name.starts_with("http://") || name.starts_with("https://") || name.starts_with("www.") {
        return false;
    }
    if name.starts_with('{') || name.starts_with('[') {
        return false;
    }
    if name.chars().filter(char::is_ascii_digit).count() > 3 {
        return false;
    }

    let special = name
        .chars()
        .filter(|c| !c.is_alphanumeric() && !c.is_whitespace() && !matches!(c, '-' | '\'' | '.' | ','))
        .count();
    special <= 2
}

/// Parse a date string from meta tags, JSON-LD or DOM attributes.
///
/// Supports RFC 3339, ISO 8601 without an offset (read as UTC), and a few
/// common human-readable date formats.
#[must_use]
pub fn parse_meta_date(date_str: &str) -> Option<DateTime<Utc>> {
    let date_str = date_str.trim();
    if date_str.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%dT%H:%M:%S%.f%z", "%a, %d %b %Y %H:%M:%S %z"] {
        if let Ok(dt) = DateTime::parse_from_str(date_str, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, fmt) {
            return Some(dt.and_utc());
        }
    }

    let formats = [
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%d/%m/%Y",
        "%B %d, %Y", // January 15, 2024
        "%b %d, %Y", // Jan 15, 2024
        "%d %B %Y",  // 15 January 2024
    ];
    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(date_str, fmt) {
            return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}
