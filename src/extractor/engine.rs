//! Delegation to the Readability engine.
//!
//! The engine runs on its own thread and answers over a channel, so a slow or
//! stuck parse is bounded by [`Options::engine_timeout`]. A worker that misses
//! the deadline is left to finish on its own; its answer is dropped.

use std::sync::mpsc;
use std::thread;

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::metadata::{non_empty, parse_meta_date};
use crate::node::{Element, Node};
use crate::options::EngineInput;
use crate::serialize::element_to_html;
use crate::{parser, Options};

use super::{Extraction, ExtractionStrategy};

/// Fields the engine hands back across the thread boundary.
#[derive(Debug, Clone, Default)]
pub struct EngineArticle {
    pub title: Option<String>,
    pub byline: Option<String>,
    pub published_time: Option<String>,
    pub content: Option<String>,
}

/// Hands the document to Readability.
#[derive(Debug, Clone, Copy)]
pub struct EngineExtractor<'a> {
    opts: &'a Options,
}

impl<'a> EngineExtractor<'a> {
    #[must_use]
    pub fn new(opts: &'a Options) -> Self {
        Self { opts }
    }

    /// The document as the engine should see it.
    fn engine_input(&self, html: &str) -> String {
        match self.opts.engine_input {
            EngineInput::Raw => html.to_string(),
            EngineInput::Cleaned => {
                let mut doc = parser::parse(html);
                self.opts.cleaner.cleaner().clean(&mut doc);
                element_to_html(&doc)
            }
        }
    }
}

impl ExtractionStrategy for EngineExtractor<'_> {
    fn extract(&self, html: &str) -> Result<Extraction> {
        let input = self.engine_input(html);
        let url = self.opts.url.clone();
        let article = run_with_timeout(self.opts.engine_timeout, move || {
            run_engine(&input, url.as_deref())
        })?;
        Ok(into_extraction(article))
    }
}

/// Runs `job` on a worker thread and waits at most `timeout` for its answer.
pub fn run_with_timeout<T, F>(timeout: std::time::Duration, job: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("readability-engine".to_string())
        .spawn(move || {
            // The receiver is gone once the caller timed out.
            let _ = tx.send(job());
        })
        .map_err(|e| Error::Engine(format!("failed to spawn engine thread: {e}")))?;

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(mpsc::RecvTimeoutError::Timeout) => {
            tracing::warn!(?timeout, "Readability engine timed out");
            Err(Error::EngineTimeout(timeout))
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            Err(Error::Engine("engine thread exited without a result".to_string()))
        }
    }
}

#[cfg(feature = "readability")]
fn run_engine(html: &str, url: Option<&str>) -> Result<EngineArticle> {
    use dom_smoothie::Readability;

    let mut reader =
        Readability::new(html, url, None).map_err(|e| Error::Engine(e.to_string()))?;
    let article = reader.parse().map_err(|e| Error::Engine(e.to_string()))?;

    Ok(EngineArticle {
        title: Some(article.title),
        byline: article.byline,
        published_time: article.published_time,
        content: Some(article.content.to_string()),
    })
}

#[cfg(not(feature = "readability"))]
fn run_engine(_html: &str, _url: Option<&str>) -> Result<EngineArticle> {
    Err(Error::EngineUnavailable)
}

/// Normalizes engine output: empty strings become `None`, the content is
/// parsed into an owned tree.
#[must_use]
pub fn into_extraction(article: EngineArticle) -> Extraction {
    let publication_datetime: Option<DateTime<Utc>> = non_empty(article.published_time)
        .and_then(|date| parse_meta_date(&date));

    let content = non_empty(article.content).and_then(|html| {
        let nodes = parser::parse_fragment(&html);
        let root = Element::document(nodes);
        (!root.text_content().trim().is_empty()).then_some(Node::Element(root))
    });

    Extraction {
        title: non_empty(article.title),
        byline: non_empty(article.byline),
        publication_datetime,
        content,
    }
}
