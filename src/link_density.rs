//! Link density measures.
//!
//! Blocks made mostly of link text are navigation or teaser lists rather than
//! article prose. The scorer uses the ratio to damp candidates, and the
//! pruning pass uses [`link_density_test`] to drop link-heavy blocks.

use crate::node::Element;

/// Links shorter than this many characters count as "short".
const SHORT_LINK_LEN: usize = 10;

/// Heuristics on the links below an element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkInfo {
    /// Number of `<a>` elements.
    pub links: usize,
    /// Total characters of trimmed link text.
    pub link_len: usize,
    /// Links with text shorter than 10 characters.
    pub short_links: usize,
    /// Links with any text at all.
    pub non_empty_links: usize,
    /// Characters of the longest single link.
    pub longest_link: usize,
}

/// Collects [`LinkInfo`] for all links below `el`.
#[must_use]
pub fn collect_link_info(el: &Element) -> LinkInfo {
    let mut info = LinkInfo::default();
    el.walk_elements(|node| {
        if node.name != "a" {
            return;
        }
        info.links += 1;
        let text = node.text_content();
        let len = text.trim().chars().count();
        if len == 0 {
            return;
        }
        info.link_len += len;
        info.longest_link = info.longest_link.max(len);
        info.non_empty_links += 1;
        if len < SHORT_LINK_LEN {
            info.short_links += 1;
        }
    });
    info
}

/// Share of the element's text that sits inside links, in `0.0..=1.0`.
#[must_use]
pub fn link_density(el: &Element) -> f64 {
    let text_len = text_len(el);
    if text_len == 0 {
        return 0.0;
    }
    let info = collect_link_info(el);
    (info.link_len as f64 / text_len as f64).min(1.0)
}

/// Whether `el` is rich enough in links to be boilerplate.
///
/// `has_next_sibling` relaxes the length limit for trailing blocks, and
/// `max_link_ratio` is the share of link text above which a short block
/// counts as a link list.
#[must_use]
pub fn link_density_test(el: &Element, has_next_sibling: bool, max_link_ratio: f64) -> bool {
    let info = collect_link_info(el);
    if info.links == 0 {
        return false;
    }

    let text_len = text_len(el);

    // One long link spanning almost the whole block.
    if info.links == 1 && info.longest_link > 100 && info.longest_link as f64 > text_len as f64 * 0.9 {
        return true;
    }

    let limit = match (el.name.as_str(), has_next_sibling) {
        ("p", true) => 30,
        ("p", false) => 60,
        (_, true) => 100,
        (_, false) => 300,
    };
    if text_len >= limit {
        return false;
    }

    if info.non_empty_links == 0 {
        return true;
    }
    if info.link_len as f64 > text_len as f64 * max_link_ratio {
        return true;
    }
    info.non_empty_links > 1 && info.short_links as f64 / info.non_empty_links as f64 > max_link_ratio
}

fn text_len(el: &Element) -> usize {
    el.text_content().trim().chars().count()
}
