//! Integration tests for real-world article extraction
//!
//! Tests extraction from realistic HTML samples representing various content types.

#![allow(clippy::expect_used)] // expect() is appropriate in tests for clear panic messages

use chrono::{TimeZone, Utc};
use readable_article::{parse_to_json, simplify, ArticleResult};

/// Test fixture path helper
fn fixture_path(name: &str) -> String {
    format!(
        "{}/tests/integration/fixtures/{}",
        env!("CARGO_MANIFEST_DIR"),
        name
    )
}

fn extract_fixture(name: &str) -> ArticleResult {
    let html = std::fs::read_to_string(fixture_path(name)).expect("Failed to read fixture");
    parse_to_json(&html, false, false, false).expect("Extraction failed")
}

#[test]
fn test_extract_full_article_with_metadata() {
    let result = extract_fixture("article_full.html");
    let text = result.text();

    // Main article content is present
    assert!(text.len() > 500, "Content should be substantial");
    assert!(text.contains("groundbreaking discovery"));
    assert!(text.contains("Dr. Maria Johnson"));
    assert!(text.contains("The desert was once green"));
    assert!(text.contains("Radar image of the buried channels."));

    // Metadata
    assert_eq!(
        result.title.as_deref(),
        Some("Scientists Map Ancient River Network Beneath Desert")
    );
    assert_eq!(result.byline.as_deref(), Some("Dr. Maria Johnson"));
    assert_eq!(
        result.publication_datetime,
        Some(Utc.with_ymd_and_hms(2024, 2, 12, 9, 15, 0).unwrap())
    );

    // Boilerplate removal
    for boilerplate in [
        "Subscribe to our newsletter",
        "Popular Posts",
        "3 Comments",
        "Copyright 2024",
        "We use cookies",
        "Facebook",
        "trackPageView",
    ] {
        assert!(!text.contains(boilerplate), "{boilerplate:?} leaked into {text}");
    }
}

#[test]
fn test_full_article_block_order() {
    let result = extract_fixture("article_full.html");
    let blocks: Vec<String> = result
        .plain_text
        .expect("plain_text")
        .into_iter()
        .map(|b| b.text)
        .collect();

    let position = |needle: &str| {
        blocks
            .iter()
            .position(|b| b.contains(needle))
            .unwrap_or_else(|| panic!("{needle:?} not in {blocks:?}"))
    };
    assert!(position("groundbreaking discovery") < position("Using satellite radar"));
    assert!(position("Using satellite radar") < position("What the rivers tell us"));
    assert!(position("What the rivers tell us") < position("eight metres"));
    assert!(position("eight metres") < position("drill sediment cores"));
    assert_eq!(blocks[position("eight metres")], "Channels were found at depths of up to eight metres.");
}

#[test]
fn test_full_article_plain_content_is_plain() {
    let result = extract_fixture("article_full.html");
    let plain = result.plain_content.expect("plain_content");

    assert!(plain.starts_with("<div>"));
    for tag in ["<img", "<a ", "<button", "<script", "<time", "<figure", "class="] {
        assert!(!plain.contains(tag), "{tag} in {plain}");
    }
    assert!(plain.contains("<blockquote>"));
    assert!(plain.contains("<ul><li>"));
    assert_eq!(simplify(&plain), plain);
}

#[test]
fn test_extract_blog_post() {
    let result = extract_fixture("blog_post.html");
    let text = result.text();

    assert_eq!(result.title.as_deref(), Some("Notes on Sourdough"));
    assert_eq!(result.byline.as_deref(), Some("Sam Baker"));
    assert_eq!(
        result.publication_datetime,
        Some(Utc.with_ymd_and_hms(2023, 9, 30, 0, 0, 0).unwrap())
    );

    assert!(text.contains("sourdough rewards patience"));
    assert!(text.contains("A kitchen scale"));
    assert!(!text.contains("Recipes"));
    assert!(!text.contains("You may also like"));
}

#[test]
fn test_blog_post_line_breaks() {
    let result = extract_fixture("blog_post.html");
    let blocks: Vec<String> = result
        .plain_text
        .expect("plain_text")
        .into_iter()
        .map(|b| b.text)
        .collect();

    // A single <br> joins lines, a double <br> starts a new paragraph.
    assert!(blocks
        .iter()
        .any(|b| b.ends_with("grown by about half. Shape gently.")));
    assert!(blocks.iter().any(|b| b == "Then bake hot."));
}
