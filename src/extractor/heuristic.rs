//! Built-in content extractor.
//!
//! Paragraph-like elements hand out score to their parent and grandparent.
//! The best-scoring container, together with siblings that look like part of
//! the same article, becomes the content.
//!
//! Candidates are addressed by their child-index path from the document root;
//! a `BTreeMap` keyed by path iterates in document order, so ties go to the
//! earliest candidate.

use std::collections::BTreeMap;

use crate::dom;
use crate::error::Result;
use crate::link_density::{link_density, link_density_test};
use crate::metadata;
use crate::node::{Element, Node};
use crate::patterns::{MAYBE_CANDIDATE, NEGATIVE_CLASS, POSITIVE_CLASS, UNLIKELY_CANDIDATE};
use crate::simple_tree::simplify_structure;
use crate::text::collapse_whitespace;
use crate::Options;

use super::{Extraction, ExtractionStrategy};

/// Elements whose text feeds the scores of their ancestors.
const PARAGRAPH_TAGS: [&str; 4] = ["p", "pre", "td", "blockquote"];

/// Children that stop a `<div>` from counting as a paragraph.
const DIV_BLOCK_CHILDREN: [&str; 12] = [
    "blockquote", "dl", "div", "ol", "p", "pre", "table", "ul", "section", "article", "h2", "h3",
];

/// Elements never considered as candidates.
const EXCLUDED_CANDIDATES: [&str; 2] = ["html", "head"];

/// Elements kept by unlikely-candidate stripping regardless of class.
const ALWAYS_KEEP: [&str; 5] = ["html", "body", "article", "main", "a"];

/// Blocks checked by link-heavy pruning.
const PRUNABLE_TAGS: [&str; 10] = [
    "p", "ul", "ol", "dl", "div", "section", "table", "aside", "header", "footer",
];

/// Below this many characters a first attempt is retried without stripping.
const MIN_ARTICLE_LEN: usize = 250;

/// Paragraphs longer than this join the article when link-light.
const LONG_PARAGRAPH_LEN: usize = 80;

/// Scores the document and cuts out the article.
#[derive(Debug, Clone, Copy)]
pub struct HeuristicExtractor<'a> {
    opts: &'a Options,
}

impl<'a> HeuristicExtractor<'a> {
    #[must_use]
    pub fn new(opts: &'a Options) -> Self {
        Self { opts }
    }
}

impl ExtractionStrategy for HeuristicExtractor<'_> {
    fn extract(&self, html: &str) -> Result<Extraction> {
        let doc = dom::parse(html);
        let meta = metadata::extract_metadata(&doc, self.opts);

        let mut tree = dom::to_owned_tree(&doc);
        self.opts.cleaner.cleaner().clean(&mut tree);

        let content = select_content(&tree, self.opts);
        let root = simplify_structure(content);
        tracing::debug!(blocks = root.children.len(), "heuristic extraction finished");

        Ok(Extraction {
            title: meta.title,
            byline: meta.byline,
            publication_datetime: meta.publication_datetime,
            content: Some(Node::Element(root)),
        })
    }
}

/// Selects the article nodes of a cleaned document.
#[must_use]
pub fn select_content(root: &Element, opts: &Options) -> Vec<Node> {
    if opts.strip_unlikely {
        let mut stripped = root.clone();
        let removed = strip_unlikely_candidates(&mut stripped);
        let content = grab_article(&stripped, opts);
        if removed == 0 || nodes_text_len(&content) >= MIN_ARTICLE_LEN {
            return content;
        }
        tracing::debug!(removed, "short result, retrying without stripping unlikely candidates");
        let retry = grab_article(root, opts);
        return if nodes_text_len(&retry) > nodes_text_len(&content) {
            retry
        } else {
            content
        };
    }
    grab_article(root, opts)
}

fn grab_article(root: &Element, opts: &Options) -> Vec<Node> {
    let scores = score_candidates(root, opts);

    let Some((best_path, best_score)) = scores
        .iter()
        .fold(None::<(&Vec<usize>, f64)>, |best, (path, &score)| match best {
            Some((_, top)) if top >= score => best,
            _ => Some((path, score)),
        })
    else {
        tracing::debug!("no scored candidate, falling back to <body>");
        let mut nodes = root
            .find_element(|el| el.name == "body")
            .map_or_else(|| root.children.clone(), |body| body.children.clone());
        if opts.prune_link_heavy {
            prune_link_heavy(&mut nodes, opts.max_link_density);
        }
        return nodes;
    };

    tracing::debug!(path = ?best_path, score = best_score, "selected top candidate");
    let mut nodes = gather_siblings(root, best_path, best_score, &scores, opts);
    if opts.prune_link_heavy {
        prune_link_heavy(&mut nodes, opts.max_link_density);
    }
    nodes
}

/// Final candidate scores, already scaled by link density.
fn score_candidates(root: &Element, opts: &Options) -> BTreeMap<Vec<usize>, f64> {
    let mut raw = BTreeMap::new();
    let mut path = Vec::new();
    let mut ancestors = Vec::new();
    collect_scores(root, &mut path, &mut ancestors, opts, &mut raw);

    raw.into_iter()
        .filter_map(|(path, score)| {
            let el = element_at(root, &path)?;
            Some((path, score * (1.0 - link_density(el))))
        })
        .collect()
}

fn collect_scores<'a>(
    el: &'a Element,
    path: &mut Vec<usize>,
    ancestors: &mut Vec<(&'a Element, Vec<usize>)>,
    opts: &Options,
    scores: &mut BTreeMap<Vec<usize>, f64>,
) {
    if is_paragraph_like(el) {
        let text = collapse_whitespace(&el.text_content());
        let len = text.chars().count();
        if len >= opts.min_paragraph_len {
            let commas = text.matches(',').count();
            let content_score = 1.0 + commas as f64 + (len / 100).min(3) as f64;

            let mut levels = ancestors.iter().rev().take(2);
            if let Some((parent, parent_path)) = levels.next() {
                add_score(scores, parent, parent_path, content_score);
            }
            if let Some((grand, grand_path)) = levels.next() {
                add_score(scores, grand, grand_path, content_score / 2.0);
            }
        }
    }

    for (i, child) in el.children.iter().enumerate() {
        if let Node::Element(child) = child {
            ancestors.push((el, path.clone()));
            path.push(i);
            collect_scores(child, path, ancestors, opts, scores);
            path.pop();
            ancestors.pop();
        }
    }
}

fn add_score(scores: &mut BTreeMap<Vec<usize>, f64>, el: &Element, path: &[usize], score: f64) {
    if el.is_document() || EXCLUDED_CANDIDATES.contains(&el.name.as_str()) {
        return;
    }
    *scores
        .entry(path.to_vec())
        .or_insert_with(|| initial_score(el)) += score;
}

fn is_paragraph_like(el: &Element) -> bool {
    if PARAGRAPH_TAGS.contains(&el.name.as_str()) {
        return true;
    }
    el.name == "div"
        && !el
            .element_children()
            .any(|c| DIV_BLOCK_CHILDREN.contains(&c.name.as_str()))
}

/// Tag-based starting score plus the class/id weight.
fn initial_score(el: &Element) -> f64 {
    let tag_score = match el.name.as_str() {
        "div" | "article" | "main" => 5.0,
        "section" | "pre" | "td" | "blockquote" => 3.0,
        "address" | "ol" | "ul" | "dl" | "dd" | "dt" | "li" | "form" => -3.0,
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "th" => -5.0,
        _ => 0.0,
    };
    tag_score + class_weight(el)
}

/// +25 / -25 for each of class and id matching the content / chrome patterns.
#[must_use]
pub fn class_weight(el: &Element) -> f64 {
    let mut weight = 0.0;
    for value in [el.attr("class"), el.attr("id")].into_iter().flatten() {
        if value.is_empty() {
            continue;
        }
        if NEGATIVE_CLASS.is_match(value) {
            weight -= 25.0;
        }
        if POSITIVE_CLASS.is_match(value) {
            weight += 25.0;
        }
    }
    weight
}

/// Returns the top candidate and the siblings that belong with it.
fn gather_siblings(
    root: &Element,
    best_path: &[usize],
    best_score: f64,
    scores: &BTreeMap<Vec<usize>, f64>,
    opts: &Options,
) -> Vec<Node> {
    let Some((&best_index, parent_path)) = best_path.split_last() else {
        return root.children.clone();
    };
    let Some(parent) = element_at(root, parent_path) else {
        return Vec::new();
    };
    let best_class = parent
        .children
        .get(best_index)
        .and_then(Node::as_element)
        .and_then(|el| el.attr("class"))
        .filter(|c| !c.is_empty());

    let threshold = opts.min_sibling_score.max(best_score * opts.sibling_score_ratio);
    let mut nodes = Vec::new();

    for (i, child) in parent.children.iter().enumerate() {
        let Node::Element(sibling) = child else {
            continue;
        };
        if i == best_index {
            nodes.push(child.clone());
            continue;
        }

        let mut sibling_path = parent_path.to_vec();
        sibling_path.push(i);
        let mut score = scores.get(&sibling_path).copied().unwrap_or(0.0);
        if best_class.is_some() && sibling.attr("class") == best_class {
            score += best_score * 0.2;
        }

        let append = if score >= threshold {
            true
        } else if sibling.name == "p" {
            let text = collapse_whitespace(&sibling.text_content());
            let len = text.chars().count();
            let density = link_density(sibling);
            if len > LONG_PARAGRAPH_LEN {
                density < 0.25
            } else {
                len > 0 && density == 0.0 && (text.contains(". ") || text.ends_with('.'))
            }
        } else {
            false
        };

        if append {
            nodes.push(child.clone());
        }
    }
    nodes
}

/// Removes elements whose class or id marks them as page chrome.
fn strip_unlikely_candidates(root: &mut Element) -> usize {
    root.remove_subtree(|node| {
        let Node::Element(el) = node else {
            return false;
        };
        if ALWAYS_KEEP.contains(&el.name.as_str()) {
            return false;
        }
        let hint = format!(
            "{} {}",
            el.attr("class").unwrap_or_default(),
            el.attr("id").unwrap_or_default()
        );
        let hint = hint.trim();
        !hint.is_empty() && UNLIKELY_CANDIDATE.is_match(hint) && !MAYBE_CANDIDATE.is_match(hint)
    })
}

/// Drops link-heavy blocks at any depth of `nodes`.
fn prune_link_heavy(nodes: &mut Vec<Node>, max_link_ratio: f64) {
    let mut removed = 0usize;
    prune_in(nodes, max_link_ratio, &mut removed);
    if removed > 0 {
        tracing::debug!(removed, "pruned link-heavy blocks");
    }
}

fn prune_in(nodes: &mut Vec<Node>, max_link_ratio: f64, removed: &mut usize) {
    let element_positions: Vec<usize> = nodes
        .iter()
        .enumerate()
        .filter(|(_, n)| matches!(n, Node::Element(_)))
        .map(|(i, _)| i)
        .collect();

    let doomed: Vec<usize> = element_positions
        .iter()
        .enumerate()
        .filter_map(|(k, &i)| {
            let el = nodes[i].as_element()?;
            let has_next_sibling = k + 1 < element_positions.len();
            (PRUNABLE_TAGS.contains(&el.name.as_str())
                && link_density_test(el, has_next_sibling, max_link_ratio))
            .then_some(i)
        })
        .collect();

    for &i in doomed.iter().rev() {
        nodes.remove(i);
        *removed += 1;
    }

    for node in nodes.iter_mut() {
        if let Node::Element(el) = node {
            prune_in(&mut el.children, max_link_ratio, removed);
        }
    }
}

fn element_at<'a>(root: &'a Element, path: &[usize]) -> Option<&'a Element> {
    path.iter()
        .try_fold(root, |el, &i| el.children.get(i).and_then(Node::as_element))
}

fn nodes_text_len(nodes: &[Node]) -> usize {
    nodes
        .iter()
        .map(|n| collapse_whitespace(&n.text_content()).chars().count())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::serialize::element_to_html;

    const PARAGRAPH: &str = "This is a reasonably long paragraph of article text, with commas, that should score well.";

    fn article_html() -> String {
        format!(
            r#"<html><head><title>T</title></head><body>
            <div id="nav-menu"><a href="/">Home</a> <a href="/a">About</a></div>
            <div class="article-body"><h2>Heading</h2><p>{PARAGRAPH}</p><p>{PARAGRAPH}</p><p>{PARAGRAPH}</p></div>
            <div class="sidebar"><p>Unrelated sidebar text that is long enough to score a little.</p></div>
            </body></html>"#
        )
    }

    fn cleaned(html: &str) -> Element {
        let mut tree = parse(html);
        Options::default().cleaner.cleaner().clean(&mut tree);
        tree
    }

    #[test]
    fn test_selects_article_container() {
        let tree = cleaned(&article_html());
        let nodes = select_content(&tree, &Options::default());
        let html = element_to_html(&simplify_structure(nodes));
        assert!(html.starts_with("<div><h2>Heading</h2><p>This is a reasonably"));
        assert!(!html.contains("Home"));
        assert!(!html.contains("sidebar"));
    }

    #[test]
    fn test_class_weight() {
        let mut el = Element::new("div");
        el.set_attr("class", "post-content");
        assert_eq!(class_weight(&el), 25.0);
        el.set_attr("id", "comment-list");
        assert_eq!(class_weight(&el), 0.0);
        assert_eq!(class_weight(&Element::new("div")), 0.0);
    }

    #[test]
    fn test_initial_score_by_tag() {
        assert_eq!(initial_score(&Element::new("article")), 5.0);
        assert_eq!(initial_score(&Element::new("section")), 3.0);
        assert_eq!(initial_score(&Element::new("ul")), -3.0);
        assert_eq!(initial_score(&Element::new("h2")), -5.0);
    }

    #[test]
    fn test_short_paragraphs_do_not_score() {
        let tree = cleaned("<body><div><p>tiny</p><p>also tiny</p></div></body>");
        assert!(score_candidates(&tree, &Options::default()).is_empty());
        let nodes = select_content(&tree, &Options::default());
        assert_eq!(
            element_to_html(&simplify_structure(nodes)),
            "<div><p>tiny</p><p>also tiny</p></div>"
        );
    }

    #[test]
    fn test_sibling_paragraph_joins() {
        let html = format!(
            "<body><div><div class=\"story\"><p>{PARAGRAPH}</p><p>{PARAGRAPH}</p></div><p>A short closing line.</p><p><a href=\"/x\">Read more</a></p></div></body>"
        );
        let tree = cleaned(&html);
        let html = element_to_html(&simplify_structure(select_content(&tree, &Options::default())));
        assert!(html.contains("A short closing line."));
        assert!(!html.contains("Read more"));
    }

    #[test]
    fn test_link_heavy_list_pruned() {
        let html = format!(
            "<body><article><p>{PARAGRAPH}</p><ul><li><a href=\"/1\">One</a></li><li><a href=\"/2\">Two</a></li></ul><p>{PARAGRAPH}</p></article></body>"
        );
        let tree = cleaned(&html);
        let text = element_to_html(&simplify_structure(select_content(&tree, &Options::default())));
        assert!(!text.contains("One"));

        let opts = Options {
            prune_link_heavy: false,
            ..Options::default()
        };
        let text = element_to_html(&simplify_structure(select_content(&tree, &opts)));
        assert!(text.contains("One"));
    }

    #[test]
    fn test_element_at() {
        let tree = parse("<p>x</p>");
        let html = element_at(&tree, &[0]).map(|e| e.name.clone());
        assert_eq!(html.as_deref(), Some("html"));
        assert!(element_at(&tree, &[9]).is_none());
    }

    #[test]
    fn test_extractor_metadata_and_content() {
        let html = format!(
            r#"<html><head><title>Headline of the article here</title><meta name="author" content="Jane Doe"></head>
            <body><article><p>{PARAGRAPH}</p></article></body></html>"#
        );
        let opts = Options::default();
        let extraction = HeuristicExtractor::new(&opts).extract(&html);
        let extraction = extraction.unwrap();
        assert_eq!(extraction.title.as_deref(), Some("Headline of the article here"));
        assert_eq!(extraction.byline.as_deref(), Some("Jane Doe"));
        assert!(extraction.content.is_some());
    }
}
