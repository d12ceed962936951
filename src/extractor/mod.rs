//! Content extraction strategies.
//!
//! - `heuristic`: built-in candidate scorer over the cleaned tree
//! - `engine`: delegation to the Readability engine (`dom_smoothie`)
//!
//! Both produce an [`Extraction`]; [`extract`] picks one from
//! [`Options::use_readability`].

pub mod engine;
pub mod heuristic;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::node::Node;
use crate::Options;

pub use engine::EngineExtractor;
pub use heuristic::HeuristicExtractor;

/// What a strategy found in a document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub title: Option<String>,
    pub byline: Option<String>,
    pub publication_datetime: Option<DateTime<Utc>>,
    /// Article subtree, `None` when the strategy found nothing.
    pub content: Option<Node>,
}

/// A way of turning a whole HTML document into an [`Extraction`].
pub trait ExtractionStrategy {
    fn extract(&self, html: &str) -> Result<Extraction>;
}

/// Runs the strategy selected by `opts`.
pub fn extract(html: &str, opts: &Options) -> Result<Extraction> {
    if opts.use_readability {
        tracing::debug!("extracting with the Readability engine");
        EngineExtractor::new(opts).extract(html)
    } else {
        tracing::debug!("extracting with the built-in heuristic");
        HeuristicExtractor::new(opts).extract(html)
    }
}
