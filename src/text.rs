//! Text normalization shared by the plain-tree builder and the flattener.

use unicode_normalization::UnicodeNormalization;

/// Strips control characters, applies NFKC and collapses whitespace.
///
/// Tab, newline, carriage return and form feed survive the control-character
/// pass and are then collapsed like any other whitespace.
#[must_use]
pub fn normalise_text(text: &str) -> String {
    let stripped: String = strip_control_characters(text).nfkc().collect();
    collapse_whitespace(&stripped)
}

/// Collapses every whitespace run to a single space and trims both ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Removes C0/C1 controls (except `\t \n \r \f`), zero-width and
/// bidi formatting characters, and private-use code points.
#[must_use]
pub fn strip_control_characters(text: &str) -> String {
    text.chars().filter(|&c| !is_stripped(c)).collect()
}

fn is_stripped(c: char) -> bool {
    match c {
        '\t' | '\n' | '\r' | '\u{0c}' => false,
        c if c.is_control() => true,
        '\u{ad}'
        | '\u{200b}'..='\u{200f}'
        | '\u{202a}'..='\u{202e}'
        | '\u{2060}'..='\u{2064}'
        | '\u{feff}'
        | '\u{e000}'..='\u{f8ff}' => true,
        _ => false,
    }
}
