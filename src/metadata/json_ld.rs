//! JSON-LD metadata parsing.
//!
//! Schema.org objects are collected from every `application/ld+json` script,
//! including `@graph` arrays and nested objects, then ranked so that top-level
//! article objects win over nested ones.

use dom_query::{Document, Selection};
use serde_json::{Map, Value};

use super::meta_tags::{parse_meta_date, validate_metadata_name};
use super::ArticleMetadata;
use crate::dom;
use crate::Options;

/// A typed schema object with its ranking.
#[derive(Debug, Clone)]
struct SchemaData<'a> {
    data: &'a Map<String, Value>,
    importance: i32,
}

/// Extract title, byline and date from JSON-LD scripts.
#[must_use]
pub fn extract_json_ld(doc: &Document, original: ArticleMetadata, _opts: &Options) -> ArticleMetadata {
    let mut result = original;

    let values: Vec<Value> = doc
        .select(r#"script[type="application/ld+json"]"#)
        .nodes()
        .iter()
        .filter_map(|node| {
            let text = dom::text_content(&Selection::from(*node));
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            match serde_json::from_str(text) {
                Ok(value) => Some(value),
                Err(err) => {
                    tracing::debug!(%err, "skipping malformed JSON-LD");
                    None
                }
            }
        })
        .collect();

    let mut persons = Vec::new();
    let mut articles = Vec::new();
    for value in &values {
        process_schema_value(value, false, 0, &mut persons, &mut articles);
    }
    persons.sort_by(|a, b| b.importance.cmp(&a.importance));
    articles.sort_by(|a, b| b.importance.cmp(&a.importance));

    for article in &articles {
        if result.title.is_none() {
            result.title = get_single_string_value(article.data, "headline")
                .or_else(|| get_single_string_value(article.data, "name"));
        }
        if result.byline.is_none() {
            result.byline = article.data.get("author").and_then(author_names);
        }
        if result.publication_datetime.is_none() {
            result.publication_datetime = get_single_string_value(article.data, "datePublished")
                .or_else(|| get_single_string_value(article.data, "dateCreated"))
                .and_then(|s| parse_meta_date(&s));
        }
    }

    if result.byline.is_none() {
        result.byline = persons.iter().find_map(|p| get_schema_name(p.data));
    }

    result
}

/// Recursively collect typed schema objects.
fn process_schema_value<'a>(
    value: &'a Value,
    has_parent: bool,
    depth: i32,
    persons: &mut Vec<SchemaData<'a>>,
    articles: &mut Vec<SchemaData<'a>>,
) {
    match value {
        Value::Object(map) => {
            let types = get_schema_types(map);
            let typed = !types.is_empty();
            if typed {
                let importance = calculate_importance(&types, has_parent, depth);
                if is_person_type(&types) {
                    persons.push(SchemaData { data: map, importance });
                } else if is_article_type(&types) {
                    articles.push(SchemaData { data: map, importance });
                }
            }
            let depth = if typed { depth + 1 } else { depth };
            for val in map.values() {
                process_schema_value(val, has_parent || typed, depth, persons, articles);
            }
        }
        Value::Array(arr) => {
            for item in arr {
                process_schema_value(item, has_parent, depth, persons, articles);
            }
        }
        _ => {}
    }
}

/// Lowercased `@type` values of a schema object.
fn get_schema_types(map: &Map<String, Value>) -> Vec<String> {
    match map.get("@type") {
        Some(Value::String(s)) => vec![s.to_lowercase()],
        Some(Value::Array(arr)) => arr
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_lowercase)
            .collect(),
        _ => Vec::new(),
    }
}

/// `name`, or `givenName` + `familyName`.
fn get_schema_name(data: &Map<String, Value>) -> Option<String> {
    if let Some(name) = get_single_string_value(data, "name") {
        return validate_metadata_name(&name).then_some(name);
    }

    let given = data.get("givenName").and_then(Value::as_str).unwrap_or("");
    let family = data.get("familyName").and_then(Value::as_str).unwrap_or("");
    let full = format!("{} {}", given.trim(), family.trim()).trim().to_string();
    (!full.is_empty() && validate_metadata_name(&full)).then_some(full)
}

/// Author value of an article: a name, a person object, or a list of either.
fn author_names(value: &Value) -> Option<String> {
    let names: Vec<String> = match value {
        Value::String(s) => vec![s.trim().to_string()],
        Value::Object(map) => get_schema_name(map).into_iter().collect(),
        Value::Array(arr) => arr.iter().filter_map(author_names).collect(),
        _ => Vec::new(),
    };
    let names: Vec<String> = names
        .into_iter()
        .filter(|n| validate_metadata_name(n))
        .collect();
    (!names.is_empty()).then(|| names.join(", "))
}

/// Get a single string value from an object property.
fn get_single_string_value(data: &Map<String, Value>, key: &str) -> Option<String> {
    let s = match data.get(key)? {
        Value::String(s) => s.as_str(),
        Value::Array(arr) => arr.first().and_then(Value::as_str)?,
        _ => return None,
    };
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn is_person_type(types: &[String]) -> bool {
    types.iter().any(|t| matches!(t.as_str(), "person" | "author" | "creator"))
}

fn is_article_type(types: &[String]) -> bool {
    types.iter().any(|t| {
        matches!(
            t.as_str(),
            "article"
                | "newsarticle"
                | "blogposting"
                | "reportagenewsarticle"
                | "analysisnewsarticle"
                | "opinionnewsarticle"
                | "report"
                | "techarticle"
                | "scholarlyarticle"
                | "socialmediaposting"
                | "liveblogposting"
                | "webpage"
        )
    })
}

fn calculate_importance(types: &[String], has_parent: bool, depth: i32) -> i32 {
    let base = if types.iter().any(|t| t == "webpage") {
        60
    } else if is_article_type(types) {
        100
    } else {
        50
    };
    base - depth * 10 + if has_parent { 5 } else { 0 }
}
