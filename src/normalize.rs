//! Binding-to-record normalization.
//!
//! Unwraps each RDF term to its literal value and cleans up the author
//! list that the endpoint concatenated with [`AUTHOR_SEPARATOR`].

use crate::error::{Error, Result};
use crate::types::{
    RawBinding, Record, AUTHOR_SEPARATOR, FIELD_ABSTRACT, FIELD_AUTHORS, FIELD_BOOK, FIELD_TITLE,
};
use serde_json::Value;
use std::collections::HashSet;

/// Turn one raw binding into a [`Record`].
///
/// Fails with [`Error::MalformedBinding`] when `authors` is missing or its
/// value is not a string. Other fields are optional.
pub fn normalize_binding(binding: &RawBinding) -> Result<Record> {
    let authors = authors_literal(binding)?;

    Ok(Record {
        book: binding.literal(FIELD_BOOK).map(String::from),
        title: binding.literal(FIELD_TITLE).map(String::from),
        authors: dedup_authors(authors),
        abstract_text: binding.literal(FIELD_ABSTRACT).map(String::from),
    })
}

fn authors_literal(binding: &RawBinding) -> Result<&str> {
    let term = binding
        .term(FIELD_AUTHORS)
        .ok_or_else(|| Error::malformed(FIELD_AUTHORS, "is missing"))?;

    match term.get("value") {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(Error::malformed(
            FIELD_AUTHORS,
            format!("is not a string (got {})", json_kind(other)),
        )),
        None => Err(Error::malformed(FIELD_AUTHORS, "has no value")),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Split, filter, and deduplicate an author list.
///
/// Names are compared case-insensitively and the first spelling wins.
/// Blank names left by stray separators are dropped. Surviving names are
/// rejoined with [`AUTHOR_SEPARATOR`] in their original order.
///
/// ```
/// use dbpedia_books::normalize::dedup_authors;
///
/// assert_eq!(
///     dedup_authors("Jane Doe & jane doe & John Smith"),
///     "Jane Doe & John Smith"
/// );
/// ```
pub fn dedup_authors(authors: &str) -> String {
    let mut seen = HashSet::new();

    authors
        .split(AUTHOR_SEPARATOR)
        .filter(|name| !name.trim().is_empty())
        .filter(|name| seen.insert(name.to_lowercase()))
        .collect::<Vec<_>>()
        .join(AUTHOR_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding(authors: &str) -> RawBinding {
        RawBinding::new()
            .with_literal(FIELD_BOOK, "http://dbpedia.org/resource/Good_Omens")
            .with_literal(FIELD_TITLE, "Good Omens")
            .with_literal(FIELD_AUTHORS, authors)
            .with_literal(FIELD_ABSTRACT, "A comedy about the apocalypse.")
    }

    #[test]
    fn test_case_insensitive_first_wins() {
        assert_eq!(
            dedup_authors("Jane Doe & jane doe & John Smith"),
            "Jane Doe & John Smith"
        );
    }

    #[test]
    fn test_later_casing_dropped_not_merged() {
        assert_eq!(dedup_authors("jane doe & Jane Doe"), "jane doe");
    }

    #[test]
    fn test_stray_separators_filtered() {
        assert_eq!(dedup_authors(" & John Smith & "), "John Smith");
        assert_eq!(dedup_authors("A & B &  & C"), "A & B & C");
    }

    #[test]
    fn test_empty_authors() {
        assert_eq!(dedup_authors(""), "");
        assert_eq!(dedup_authors(" & "), "");
    }

    #[test]
    fn test_already_unique_unchanged() {
        let input = "Terry Pratchett & Neil Gaiman";
        assert_eq!(dedup_authors(input), input);
        assert_eq!(dedup_authors(&dedup_authors(input)), input);
    }

    #[test]
    fn test_dedup_is_whole_name() {
        assert_eq!(dedup_authors("Ford Madox Ford"), "Ford Madox Ford");
        assert_eq!(dedup_authors("Ann & Anne & ann"), "Ann & Anne");
    }

    #[test]
    fn test_unicode_case_folding() {
        assert_eq!(
            dedup_authors("Émile Zola & ÉMILE ZOLA"),
            "Émile Zola"
        );
    }

    #[test]
    fn test_normalize_binding_unwraps_values() {
        let record =
            normalize_binding(&binding("Terry Pratchett & Neil Gaiman & terry pratchett")).unwrap();
        assert_eq!(
            record.book.as_deref(),
            Some("http://dbpedia.org/resource/Good_Omens")
        );
        assert_eq!(record.title.as_deref(), Some("Good Omens"));
        assert_eq!(record.authors, "Terry Pratchett & Neil Gaiman");
        assert_eq!(
            record.abstract_text.as_deref(),
            Some("A comedy about the apocalypse.")
        );
    }

    #[test]
    fn test_normalize_binding_drops_language_tag() {
        let raw = RawBinding::new()
            .with_literal(FIELD_AUTHORS, "Frank Herbert")
            .with_term(
                FIELD_TITLE,
                serde_json::json!({ "type": "literal", "xml:lang": "en", "value": "Dune" }),
            );
        let record = normalize_binding(&raw).unwrap();
        assert_eq!(record.title.as_deref(), Some("Dune"));
        assert_eq!(record.book, None);
    }

    #[test]
    fn test_normalize_binding_zero_authors_is_ok() {
        let record = normalize_binding(&binding("")).unwrap();
        assert_eq!(record.authors, "");
    }

    #[test]
    fn test_missing_authors_is_malformed() {
        let raw = RawBinding::new().with_literal(FIELD_TITLE, "Orphan");
        let err = normalize_binding(&raw).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedBinding { field: "authors", .. }
        ));
    }

    #[test]
    fn test_non_string_authors_is_malformed() {
        let raw = RawBinding::new().with_term(FIELD_AUTHORS, serde_json::json!({ "value": ["a", "b"] }));
        let err = normalize_binding(&raw).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Malformed binding: field 'authors' is not a string (got array)"
        );
    }

    #[test]
    fn test_authors_term_without_value_is_malformed() {
        let raw = RawBinding::new().with_term(FIELD_AUTHORS, serde_json::json!({ "type": "literal" }));
        assert!(matches!(
            normalize_binding(&raw),
            Err(Error::MalformedBinding { .. })
        ));
    }
}
