//! Configuration options for article extraction.
//!
//! The `Options` struct selects the extraction strategy, the optional
//! annotations, and the knobs of the built-in scorer.

use std::time::Duration;

use crate::cleaner::CleanerConfig;
use crate::error::{Error, Result};

/// Which document the delegated engine receives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EngineInput {
    /// The HTML exactly as passed in.
    #[default]
    Raw,
    /// The document after metadata and blacklist removal.
    Cleaned,
}

/// Configuration options for article extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use readable_article::Options;
///
/// let options = Options {
///     content_digests: true,
///     node_indexes: true,
///     ..Options::default()
/// };
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct Options {
    /// Add `data-content-digest` to every element of `plain_content`.
    ///
    /// Default: `false`
    pub content_digests: bool,

    /// Add `data-node-index` to every element of `plain_content` and copy it
    /// into the text blocks.
    ///
    /// Default: `false`
    pub node_indexes: bool,

    /// Delegate extraction to the Readability engine instead of the built-in
    /// heuristic. Requires the `readability` feature.
    ///
    /// Default: `false`
    pub use_readability: bool,

    /// Document handed to the engine.
    ///
    /// Default: `EngineInput::Raw`
    pub engine_input: EngineInput,

    /// Upper bound on a single engine call.
    ///
    /// Default: 30 seconds
    pub engine_timeout: Duration,

    /// Source URL of the document, passed to the engine for resolving
    /// relative links.
    ///
    /// Default: `None`
    pub url: Option<String>,

    /// Tags and attributes removed before extraction.
    pub cleaner: CleanerConfig,

    /// Paragraph-like elements shorter than this (characters) add no score.
    ///
    /// Default: `25`
    pub min_paragraph_len: usize,

    /// Absolute minimum score for a sibling of the top candidate to join it.
    ///
    /// Default: `10.0`
    pub min_sibling_score: f64,

    /// Siblings scoring at least this share of the top candidate join it.
    ///
    /// Default: `0.2`
    pub sibling_score_ratio: f64,

    /// Link-text share above which a short block counts as a link list.
    ///
    /// Default: `0.8`
    pub max_link_density: f64,

    /// Drop link-heavy blocks from the selected content.
    ///
    /// Default: `true`
    pub prune_link_heavy: bool,

    /// Skip containers whose class/id marks them as page chrome when scoring.
    ///
    /// Default: `true`
    pub strip_unlikely: bool,

    /// Author names to filter out of the byline.
    ///
    /// Names containing any of these strings (case-insensitive) are removed.
    ///
    /// Default: `None`
    pub author_blacklist: Option<Vec<String>>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            content_digests: false,
            node_indexes: false,
            use_readability: false,
            engine_input: EngineInput::Raw,
            engine_timeout: Duration::from_secs(30),
            url: None,
            cleaner: CleanerConfig::default(),
            min_paragraph_len: 25,
            min_sibling_score: 10.0,
            sibling_score_ratio: 0.2,
            max_link_density: 0.8,
            prune_link_heavy: true,
            strip_unlikely: true,
            author_blacklist: None,
        }
    }
}

impl Options {
    /// Checks option values that would make extraction meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.engine_timeout.is_zero() {
            return Err(Error::InvalidOption("engine_timeout must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.sibling_score_ratio) {
            return Err(Error::InvalidOption(format!(
                "sibling_score_ratio must be within 0..=1, got {}",
                self.sibling_score_ratio
            )));
        }
        if !(0.0..=1.0).contains(&self.max_link_density) {
            return Err(Error::InvalidOption(format!(
                "max_link_density must be within 0..=1, got {}",
                self.max_link_density
            )));
        }
        if let Some(url) = &self.url {
            url::Url::parse(url)
                .map_err(|e| Error::InvalidOption(format!("url {url:?}: {e}")))?;
        }
        Ok(())
    }
}
