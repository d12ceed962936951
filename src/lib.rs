//! # readable-article
//!
//! Extracts a readable article view from arbitrary, possibly malformed HTML:
//! title, byline, publication date, the article content, a plain structured
//! version of that content, and the content flattened into text blocks.
//!
//! ## Quick Start
//!
//! ```rust
//! use readable_article::parse_to_json;
//!
//! let html = r#"<html><head><title>My Article</title></head>
//! <body><nav><a href="/">Home</a></nav>
//! <article><p>Main content here, long enough to count as a paragraph.</p></article></body></html>"#;
//!
//! let result = parse_to_json(html, false, false, false)?;
//! assert_eq!(result.title.as_deref(), Some("My Article"));
//! assert!(!result.plain_content.unwrap_or_default().contains("<nav"));
//! # Ok::<(), readable_article::Error>(())
//! ```
//!
//! ## Pipeline
//!
//! 1. **Parse**: html5ever (through `dom_query`) into an owned [`Node`] tree
//! 2. **Clean**: metadata, comments and blacklisted tags/attributes removed
//! 3. **Extract**: built-in heuristic, or the Readability engine
//! 4. **Plain content**: plain tree, optionally annotated with digests/indexes
//! 5. **Flatten**: one [`TextBlock`] per block-level element

mod error;
mod options;
mod patterns;
mod result;

/// Adapter over `dom_query` for metadata queries and tree conversion.
pub mod dom;

/// Owned, mutable HTML tree.
pub mod node;

/// Tolerant HTML parsing into the owned tree.
pub mod parser;

/// Minimal HTML serialization of the owned tree.
pub mod serialize;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Text normalization helpers.
pub mod text;

/// Removal of metadata, comments and blacklisted tags/attributes.
pub mod cleaner;

/// Plain structured tree builder.
pub mod simple_tree;

/// Link density testing for boilerplate detection.
pub mod link_density;

/// Metadata extraction (JSON-LD, HTML meta tags, DOM fallbacks).
pub mod metadata;

/// Content extraction strategies.
pub mod extractor;

/// Content digests and node indexes.
pub mod annotate;

/// Canonical HTML form for structural comparison.
pub mod simplify;

/// Plain content built from extracted article HTML.
pub mod plain_content;

/// Flattening of plain content into text blocks.
pub mod plain_text;

// Public API - re-exports
pub use cleaner::{Cleaner, CleanerConfig};
pub use error::{Error, Result};
pub use extractor::{Extraction, ExtractionStrategy};
pub use node::{Element, Node};
pub use options::{EngineInput, Options};
pub use plain_text::extract_text_blocks_as_plain_text;
pub use result::{ArticleResult, TextBlock};
pub use simple_tree::parse_to_tree;
pub use simplify::{equivalent, simplify};

/// Extracts an article with default options and the given switches.
///
/// # Example
///
/// ```rust
/// use readable_article::parse_to_json;
///
/// let result = parse_to_json("<p>Hello world</p>", false, true, false)?;
/// let blocks = result.plain_text.unwrap_or_default();
/// assert_eq!(blocks[0].text, "Hello world");
/// assert_eq!(blocks[0].node_index.as_deref(), Some("0.0"));
/// # Ok::<(), readable_article::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn parse_to_json(
    html: &str,
    content_digests: bool,
    node_indexes: bool,
    use_readability: bool,
) -> Result<ArticleResult> {
    let options = Options {
        content_digests,
        node_indexes,
        use_readability,
        ..Options::default()
    };
    parse_to_json_with_options(html, &options)
}

/// Extracts an article with custom options.
///
/// # Errors
///
/// Returns [`Error::InvalidOption`] when `options` fail validation, and the
/// engine errors when delegating to Readability. The built-in heuristic
/// never fails.
pub fn parse_to_json_with_options(html: &str, options: &Options) -> Result<ArticleResult> {
    options.validate()?;
    let extraction = extractor::extract(html, options)?;
    Ok(build_result(extraction, options))
}

/// Extracts an article from raw bytes, detecting the character encoding.
///
/// # Errors
///
/// Same as [`parse_to_json_with_options`].
pub fn parse_bytes_to_json(html: &[u8], options: &Options) -> Result<ArticleResult> {
    let html = encoding::decode_html(html);
    parse_to_json_with_options(&html, options)
}

fn build_result(extraction: Extraction, options: &Options) -> ArticleResult {
    let Extraction {
        title,
        byline,
        publication_datetime,
        content,
    } = extraction;

    let Some(content) = content else {
        tracing::debug!("extraction produced no content");
        return ArticleResult {
            title,
            byline,
            publication_datetime,
            ..ArticleResult::default()
        };
    };

    let content = serialize::to_html(&content);
    let mut plain = plain_content::plain_tree(&content, &options.cleaner);
    annotate::annotate(&mut plain, options.content_digests, options.node_indexes);
    let blocks = plain_text::text_blocks(&plain);

    ArticleResult {
        title,
        byline,
        publication_datetime,
        content: Some(content),
        plain_content: Some(serialize::element_to_html(&plain)),
        plain_text: Some(blocks),
    }
}
