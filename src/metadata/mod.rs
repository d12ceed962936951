//! Article metadata extraction.
//!
//! Title, byline and publication date are read from the untouched document
//! before any cleaning, in order of reliability:
//! 1. JSON-LD (Schema.org structured data)
//! 2. HTML `<meta>` tags (Open Graph, Twitter, Dublin Core, ...)
//! 3. DOM fallbacks (`<title>`, headings, byline elements, `<time>`)

pub mod dom_extraction;
pub mod json_ld;
pub mod meta_tags;

use chrono::{DateTime, Utc};
use dom_query::Document;

use crate::Options;

pub use dom_extraction::{examine_title_element, extract_dom_author, extract_dom_date, extract_dom_title};
pub use json_ld::extract_json_ld;
pub use meta_tags::{examine_meta, parse_meta_date, validate_metadata_name};

/// Metadata of an article. Absent fields are `None`, never empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleMetadata {
    /// Article headline.
    pub title: Option<String>,
    /// Author attribution.
    pub byline: Option<String>,
    /// Publication timestamp.
    pub publication_datetime: Option<DateTime<Utc>>,
}

/// Extract all metadata from a document.
#[must_use]
pub fn extract_metadata(doc: &Document, opts: &Options) -> ArticleMetadata {
    let mut metadata = ArticleMetadata::default();

    metadata = json_ld::extract_json_ld(doc, metadata, opts);
    metadata = meta_tags::examine_meta(doc, metadata, opts);

    metadata = dom_extraction::extract_dom_title(doc, metadata, opts);
    metadata = dom_extraction::extract_dom_author(doc, metadata, opts);
    metadata = dom_extraction::extract_dom_date(doc, metadata, opts);

    metadata = post_process_metadata(metadata);

    if metadata
        .byline
        .as_deref()
        .is_some_and(|author| is_blacklisted_author(author, opts))
    {
        metadata.byline = None;
    }

    tracing::debug!(
        title = metadata.title.as_deref(),
        byline = metadata.byline.as_deref(),
        date = ?metadata.publication_datetime,
        "extracted metadata"
    );
    metadata
}

/// Trim string fields and turn empty ones into `None`.
fn post_process_metadata(mut metadata: ArticleMetadata) -> ArticleMetadata {
    metadata.title = non_empty(metadata.title);
    metadata.byline = non_empty(metadata.byline);
    metadata
}

/// Trimmed value, or `None` when nothing is left.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Check if an author name is in the blacklist.
fn is_blacklisted_author(author: &str, opts: &Options) -> bool {
    let Some(blacklist) = &opts.author_blacklist else {
        return false;
    };
    let author = author.to_lowercase();
    blacklist
        .iter()
        .any(|blocked| author.contains(&blocked.to_lowercase()))
}
