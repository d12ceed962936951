//! DOM-based metadata fallbacks.
//!
//! Used for fields that neither JSON-LD nor `<meta>` tags provided: the
//! `<title>` element and top-level headings, byline elements, and `<time>`
//! elements.

use dom_query::{Document, Selection};
use regex::Regex;
use std::sync::LazyLock;

use super::meta_tags::{parse_meta_date, validate_metadata_name};
use super::ArticleMetadata;
use crate::dom;
use crate::patterns::{BYLINE_CLASS, BYLINE_PREFIX, TITLE_SEPARATOR};
use crate::text::collapse_whitespace;
use crate::Options;

/// Email addresses inside bylines.
#[allow(clippy::expect_used)]
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("valid regex"));

/// Twitter handles inside bylines.
#[allow(clippy::expect_used)]
static TWITTER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@\w+").expect("valid regex"));

/// Byline elements, most specific first.
const BYLINE_SELECTORS: [&str; 6] = [
    "[itemprop='author'] [itemprop='name']",
    "[itemprop='author']",
    "[rel='author']",
    ".byline",
    ".author",
    "[class*='byline']",
];

/// Elements carrying a publication date.
const DATE_SELECTORS: [&str; 4] = [
    "time[datetime][pubdate]",
    "[itemprop='datePublished']",
    "time[datetime]",
    "time",
];

/// Text of the `<title>` element with the site-name part cut off.
///
/// When the title splits on a separator, the longest part wins if it is
/// longer than 10 characters.
#[must_use]
pub fn examine_title_element(doc: &Document) -> Option<String> {
    let title = dom::first_text(doc, "title")?;
    let title = collapse_whitespace(&title);

    let parts: Vec<&str> = TITLE_SEPARATOR.split(&title).collect();
    if parts.len() > 1 {
        if let Some(main) = parts.iter().map(|p| p.trim()).max_by_key(|p| p.chars().count()) {
            if main.chars().count() > 10 {
                return Some(main.to_string());
            }
        }
    }
    Some(title)
}

/// Title from the `<title>` element, then from the highest-level heading.
#[must_use]
pub fn extract_dom_title(doc: &Document, original: ArticleMetadata, _opts: &Options) -> ArticleMetadata {
    let mut result = original;
    if result.title.is_some() {
        return result;
    }

    result.title = examine_title_element(doc).or_else(|| {
        ["h1", "h2", "h3"].iter().find_map(|tag| {
            dom::first_text(doc, tag)
                .map(|t| collapse_whitespace(&t))
                .filter(|t| t.chars().count() > 2)
        })
    });
    result
}

/// Byline from well-known byline elements.
#[must_use]
pub fn extract_dom_author(doc: &Document, original: ArticleMetadata, _opts: &Options) -> ArticleMetadata {
    let mut result = original;
    if result.byline.is_some() {
        return result;
    }

    for selector in BYLINE_SELECTORS {
        for node in doc.select(selector).nodes() {
            let elem = Selection::from(*node);
            if let Some(name) = extract_author_text(&elem).and_then(|t| normalize_author(&t)) {
                result.byline = Some(name);
                return result;
            }
        }
    }

    // Elements whose class only hints at a byline, e.g. "post-author-name".
    for node in doc.select("[class]").nodes() {
        let elem = Selection::from(*node);
        let class = dom::get_attribute(&elem, "class").unwrap_or_default();
        if !BYLINE_CLASS.is_match(&class) {
            continue;
        }
        if let Some(name) = extract_author_text(&elem).and_then(|t| normalize_author(&t)) {
            result.byline = Some(name);
            return result;
        }
    }

    result
}

/// Publication date from `<time>` and `datePublished` microdata.
#[must_use]
pub fn extract_dom_date(doc: &Document, original: ArticleMetadata, _opts: &Options) -> ArticleMetadata {
    let mut result = original;
    if result.publication_datetime.is_some() {
        return result;
    }

    for selector in DATE_SELECTORS {
        for node in doc.select(selector).nodes().iter().take(3) {
            let el = Selection::from(*node);
            let date = ["datetime", "content"]
                .iter()
                .filter_map(|attr| dom::get_attribute(&el, attr))
                .find_map(|value| parse_meta_date(&value))
                .or_else(|| {
                    let text = dom::text_content(&el);
                    let text = text.trim();
                    (text.len() < 100).then(|| parse_meta_date(text)).flatten()
                });
            if date.is_some() {
                result.publication_datetime = date;
                return result;
            }
        }
    }

    result
}

/// Visible text of a byline element with the "By" prefix removed.
fn extract_author_text(elem: &Selection) -> Option<String> {
    let text = collapse_whitespace(&dom::text_content(elem));
    let text = BYLINE_PREFIX.replace(&text, "");
    let text = text.trim();
    (!text.is_empty() && text.chars().count() < 120).then(|| text.to_string())
}

/// Strips emails and handles, then validates what is left as a name.
fn normalize_author(name: &str) -> Option<String> {
    let name = EMAIL_PATTERN.replace_all(name, "");
    let name = TWITTER_PATTERN.replace_all(&name, "");
    let name = collapse_whitespace(&name);
    let name = name.trim_matches(|c: char| c == ',' || c == '|' || c.is_whitespace());
    validate_metadata_name(name).then(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn run<F>(html: &str, f: F) -> ArticleMetadata
    where
        F: Fn(&Document, ArticleMetadata, &Options) -> ArticleMetadata,
    {
        f(&Document::from(html), ArticleMetadata::default(), &Options::default())
    }

    #[test]
    fn test_examine_title_element_simple() {
        let doc = Document::from("<title>  Simple   Title </title>");
        assert_eq!(examine_title_element(&doc).as_deref(), Some("Simple Title"));
    }

    #[test]
    fn test_examine_title_element_with_separator() {
        let doc = Document::from("<title>A Long Enough Headline | Example Site</title>");
        assert_eq!(
            examine_title_element(&doc).as_deref(),
            Some("A Long Enough Headline")
        );
        let doc = Document::from("<title>Short - Site</title>");
        assert_eq!(examine_title_element(&doc).as_deref(), Some("Short - Site"));
    }

    #[test]
    fn test_extract_dom_title_falls_back_to_heading() {
        let meta = run("<body><h2>Sub</h2><h1> Main  Heading </h1></body>", extract_dom_title);
        assert_eq!(meta.title.as_deref(), Some("Main Heading"));
    }

    #[test]
    fn test_extract_dom_author_byline() {
        let meta = run(
            r#"<body><p class="byline">By Jane Doe (jane@example.com)</p></body>"#,
            extract_dom_author,
        );
        assert_eq!(meta.byline.as_deref(), Some("Jane Doe"));

        let meta = run(
            r#"<body><a rel="author" href="/u/x">Written by Sam Roe</a></body>"#,
            extract_dom_author,
        );
        assert_eq!(meta.byline.as_deref(), Some("Sam Roe"));
    }

    #[test]
    fn test_extract_dom_author_class_hint() {
        let meta = run(
            r#"<body><span class="post-author-name">Kim Park</span></body>"#,
            extract_dom_author,
        );
        assert_eq!(meta.byline.as_deref(), Some("Kim Park"));
    }

    #[test]
    fn test_extract_dom_date() {
        let meta = run(
            r#"<body><time datetime="2023-07-04">July 4</time></body>"#,
            extract_dom_date,
        );
        assert_eq!(
            meta.publication_datetime,
            Some(Utc.with_ymd_and_hms(2023, 7, 4, 0, 0, 0).unwrap())
        );

        let meta = run("<body><time>March 3, 2022</time></body>", extract_dom_date);
        assert_eq!(
            meta.publication_datetime,
            Some(Utc.with_ymd_and_hms(2022, 3, 3, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_normalize_author() {
        assert_eq!(normalize_author("Jane Doe @jdoe").as_deref(), Some("Jane Doe"));
        assert_eq!(normalize_author("@handle"), None);
    }
}
