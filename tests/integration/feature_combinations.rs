//! Integration tests for option combinations
//!
//! Annotations, cleaner configuration and scorer knobs used together.

#![allow(clippy::expect_used)] // expect() is appropriate in tests for clear panic messages

use readable_article::annotate::{DIGEST_ATTR, INDEX_ATTR};
use readable_article::parser::parse;
use readable_article::{parse_to_json_with_options, CleanerConfig, Options};

fn fixture(name: &str) -> String {
    let path = format!(
        "{}/tests/integration/fixtures/{}",
        env!("CARGO_MANIFEST_DIR"),
        name
    );
    std::fs::read_to_string(path).expect("Failed to read fixture")
}

#[test]
fn test_digests_and_indexes_together() {
    let options = Options {
        content_digests: true,
        node_indexes: true,
        ..Options::default()
    };
    let result = parse_to_json_with_options(&fixture("article_full.html"), &options)
        .expect("Extraction failed");

    let tree = parse(result.plain_content.as_deref().expect("plain_content"));
    let mut elements = 0;
    let mut indexes = Vec::new();
    tree.walk_elements(|el| {
        if let Some(index) = el.attr(INDEX_ATTR) {
            elements += 1;
            indexes.push(index.to_string());
            assert!(el.attr(DIGEST_ATTR).is_some_and(|d| d.len() == 64));
        }
    });
    assert!(elements > 10);

    let mut unique = indexes.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), indexes.len());

    let blocks = result.plain_text.expect("plain_text");
    assert!(blocks
        .iter()
        .all(|b| b.node_index.as_deref().is_some_and(|i| indexes.iter().any(|x| x == i))));
}

#[test]
fn test_annotations_do_not_change_text() {
    let html = fixture("blog_post.html");
    let plain = parse_to_json_with_options(&html, &Options::default()).expect("Extraction failed");
    let annotated = parse_to_json_with_options(
        &html,
        &Options {
            content_digests: true,
            node_indexes: true,
            ..Options::default()
        },
    )
    .expect("Extraction failed");

    assert_eq!(plain.text(), annotated.text());
    assert_eq!(plain.content, annotated.content);
    assert_ne!(plain.plain_content, annotated.plain_content);
}

#[test]
fn test_author_blacklist_with_unlikely_stripping_disabled() {
    let options = Options {
        author_blacklist: Some(vec!["johnson".to_string()]),
        strip_unlikely: false,
        ..Options::default()
    };
    let result = parse_to_json_with_options(&fixture("article_full.html"), &options)
        .expect("Extraction failed");
    assert!(result.byline.is_none());
    assert!(result.text().contains("groundbreaking discovery"));
}

#[test]
fn test_cleaner_keeps_figures_when_configured() {
    let mut cleaner = CleanerConfig::default();
    cleaner.blacklist_tags.remove("img");
    let options = Options {
        cleaner,
        ..Options::default()
    };
    let result = parse_to_json_with_options(&fixture("article_full.html"), &options)
        .expect("Extraction failed");

    // Images survive cleaning but are dropped by the plain tree builder.
    assert!(result.content.as_deref().is_some_and(|c| !c.contains("<img")));
    assert!(result.text().contains("Radar image of the buried channels."));
}
