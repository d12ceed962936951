//! Edge case integration tests
//!
//! Tests for unusual inputs, boundary conditions, and error handling.

#![allow(clippy::expect_used)] // expect() is appropriate in tests for clear panic messages

use readable_article::{parse_to_json, parse_to_tree, ArticleResult};
use readable_article::serialize::element_to_html;

fn extract(html: &str) -> ArticleResult {
    parse_to_json(html, false, false, false).expect("Extraction failed")
}

#[test]
fn test_extract_minimal_html() {
    let result = extract("<html><body><p>Minimal content.</p></body></html>");
    assert_eq!(result.text(), "Minimal content.");
    assert_eq!(result.plain_content.as_deref(), Some("<div><p>Minimal content.</p></div>"));
}

#[test]
fn test_extract_empty_body() {
    let result = extract("<html><body></body></html>");
    assert_eq!(result.plain_content.as_deref(), Some("<div></div>"));
    assert_eq!(result.plain_text, Some(Vec::new()));
}

#[test]
fn test_extract_no_body() {
    let result = extract("<html><head><title>No Body</title></head></html>");
    assert_eq!(result.title.as_deref(), Some("No Body"));
    assert_eq!(result.content.as_deref(), Some("<div></div>"));
}

#[test]
fn test_extract_non_english_content() {
    let html = r#"<html lang="de"><head><title>Nachrichten</title></head><body><article>
        <p>Die Stadtverwaltung hat am Montag neue Pläne für den Ausbau der Radwege vorgestellt, die bis 2027 umgesetzt werden sollen.</p>
        <p>Anwohner können ihre Vorschläge, Fragen und Einwände noch bis Ende des Monats online einreichen.</p>
        </article></body></html>"#;
    let text = extract(html).text();
    assert!(text.contains("Pläne für den Ausbau"));
    assert!(text.contains("Einwände"));
}

#[test]
fn test_extract_unicode_content() {
    let html = "<html><body><article><p>日本語のテキスト、そして絵文字 🎉 と記号 ©。</p><p>Ελληνικά κείμενα επίσης.</p></article></body></html>";
    let text = extract(html).text();
    assert!(text.contains("日本語のテキスト"));
    assert!(text.contains("🎉"));
    assert!(text.contains("Ελληνικά"));
}

#[test]
fn test_extract_only_whitespace_content() {
    let result = extract("<html><body><div>   </div><p>\n\t</p><span>&nbsp;</span></body></html>");
    assert_eq!(result.plain_text, Some(Vec::new()));
    assert_eq!(result.plain_content.as_deref(), Some("<div></div>"));
}

#[test]
fn test_extract_script_and_style_removed() {
    let html = r#"<html><head><style>body { color: red; }</style></head><body>
        <script>var secret = "SCRIPT_CONTENT";</script>
        <article><p>Visible paragraph.</p><style>.x{}</style></article>
        <noscript>NOSCRIPT_CONTENT</noscript>
        </body></html>"#;
    let result = extract(html);
    let text = result.text();
    assert!(text.contains("Visible paragraph."));
    assert!(!text.contains("SCRIPT_CONTENT"));
    assert!(!text.contains("NOSCRIPT_CONTENT"));
    assert!(!text.contains("color"));
}

#[test]
fn test_extract_preserves_text_structure() {
    let html = r#"<html><body><article>
        <h2>Ingredients</h2>
        <ul><li>Flour</li><li>Water</li></ul>
        <h2>Method</h2>
        <ol><li>Mix</li><li>Bake</li></ol>
        <table><tr><th>Step</th><th>Minutes</th></tr><tr><td>Bake</td><td>40</td></tr></table>
        </article></body></html>"#;
    let plain = extract(html).plain_content.expect("plain_content");
    assert_eq!(
        plain,
        "<div><h2>Ingredients</h2><ul><li>Flour</li><li>Water</li></ul><h2>Method</h2><ol><li>Mix</li><li>Bake</li></ol><table><tbody><tr><th>Step</th><th>Minutes</th></tr><tr><td>Bake</td><td>40</td></tr></tbody></table></div>"
    );
}

#[test]
fn test_extract_handles_special_characters() {
    let html = "<html><body><p>Fish &amp; chips &lt;3 &quot;quoted&quot; caf&eacute;</p></body></html>";
    let result = extract(html);
    assert_eq!(result.text(), "Fish & chips <3 \"quoted\" café");
    assert_eq!(
        result.plain_content.as_deref(),
        Some("<div><p>Fish &amp; chips &lt;3 \"quoted\" café</p></div>")
    );
}

#[test]
fn test_parse_to_tree_whole_document() {
    let tree = parse_to_tree(
        "<html><head><title>T</title><meta name=\"a\" content=\"b\"></head><body><header><nav>N</nav></header><section><p>One</p><div>Two</div></section></body></html>",
    );
    assert_eq!(element_to_html(&tree), "<div><p>One</p><p>Two</p></div>");
}

#[test]
fn test_extract_performance_baseline() {
    let paragraph = "<p>Performance paragraph with a reasonable amount of text, and commas, for scoring.</p>";
    let html = format!("<html><body><article>{}</article></body></html>", paragraph.repeat(500));

    let start = std::time::Instant::now();
    let result = extract(&html);
    let elapsed = start.elapsed();

    assert_eq!(result.plain_text.map(|b| b.len()), Some(500));
    assert!(elapsed.as_secs() < 10, "Extraction took {elapsed:?}");
}
