//! Result types for extraction output.
//!
//! [`ArticleResult`] is the JSON-facing shape of one extracted article. Every
//! field is always present in the JSON, `null` when absent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One block of flattened article text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Normalized text of the block.
    pub text: String,

    /// `data-node-index` of the element the text came from, when node
    /// indexes were requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_index: Option<String>,
}

impl TextBlock {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            node_index: None,
        }
    }
}

/// Result of extracting an article from an HTML document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleResult {
    /// Article headline.
    pub title: Option<String>,

    /// Author attribution.
    pub byline: Option<String>,

    /// Publication timestamp, serialized as RFC 3339 in UTC.
    pub publication_datetime: Option<DateTime<Utc>>,

    /// Article HTML as produced by the extractor.
    pub content: Option<String>,

    /// Plain structured HTML, optionally annotated with digests and indexes.
    pub plain_content: Option<String>,

    /// `plain_content` flattened into text blocks.
    pub plain_text: Option<Vec<TextBlock>>,
}

impl ArticleResult {
    /// Serializes the result as a JSON object.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Pretty-printed variant of [`to_json`](Self::to_json).
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Concatenated block texts, one block per line.
    #[must_use]
    pub fn text(&self) -> String {
        self.plain_text
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|block| block.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
