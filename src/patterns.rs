//! Compiled regex patterns for candidate scoring and metadata cleanup.
//!
//! All patterns are compiled once on first use with `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Class/id weighting
// =============================================================================

/// Class/id names of containers likely to hold the article body.
pub static POSITIVE_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)article|body|content|entry|hentry|h-entry|main|page|pagination|post|text|blog|story")
        .expect("POSITIVE_CLASS regex")
});

/// Class/id names of page chrome, widgets and promotional blocks.
///
/// "sidebar" and "footer" are matched whole so that names like
/// `article-footer-note` do not count against a content container.
pub static NEGATIVE_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)-ad-|hidden|^hid$| hid$| hid |^hid |banner|combx|comment|com-|contact|\bfooter\b|gdpr|masthead|media|meta|outbrain|promo|related|scroll|share|shoutbox|\bsidebar\b|skyscraper|sponsor|shopping|tags|taboola|widget|breadcrumb|cookie|newsletter|subscribe|social",
    )
    .expect("NEGATIVE_CLASS regex")
});

/// Containers that look like clutter even before scoring.
pub static UNLIKELY_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)-ad-|ai2html|banner|breadcrumbs|combx|comment|community|cover-wrap|disqus|extra|footer|gdpr|header|legends|menu|related|remark|replies|rss|shoutbox|sidebar|skyscraper|social|sponsor|supplemental|ad-break|agegate|pagination|pager|popup|yom-remote",
    )
    .expect("UNLIKELY_CANDIDATE regex")
});

/// Overrides [`UNLIKELY_CANDIDATE`] when a name also hints at content.
pub static MAYBE_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)and|article|body|column|content|main|shadow").expect("MAYBE_CANDIDATE regex")
});

// =============================================================================
// Metadata cleanup
// =============================================================================

/// Class names and attributes of byline elements.
pub static BYLINE_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)byline|author|dateline|writtenby|p-author").expect("BYLINE_CLASS regex")
});

/// Leading "By" / "Written by" / "Posted by" in a byline.
pub static BYLINE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:(?:written|posted|published|words)\s+)?by[:\s]+")
        .expect("BYLINE_PREFIX regex")
});

/// Separator between the article title and the site name in `<title>`.
pub static TITLE_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+[|\u{2013}\u{2014}\-\u{00bb}:/]\s+").expect("TITLE_SEPARATOR regex")
});
