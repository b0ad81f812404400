//! Public types for the book lookup pipeline.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Separator between author names.
///
/// The SPARQL query concatenates authors with it and the normalizer
/// splits on it, so both sides must agree.
pub const AUTHOR_SEPARATOR: &str = " & ";

/// Binding variable holding the book URI.
pub const FIELD_BOOK: &str = "book";
/// Binding variable holding the English label of the book.
pub const FIELD_TITLE: &str = "title";
/// Binding variable holding the concatenated author names.
pub const FIELD_AUTHORS: &str = "authors";
/// Binding variable holding the abstract.
pub const FIELD_ABSTRACT: &str = "abstract";

/// One row of SPARQL JSON results, as emitted by a binding source.
///
/// Each variable maps to an RDF term object such as
/// `{"type": "literal", "xml:lang": "en", "value": "Dune"}`. Only `value`
/// is used; the rest of the term is metadata and gets dropped.
///
/// The terms are kept as raw JSON so that a term with a missing or
/// non-string `value` reaches the normalizer and is reported there.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawBinding(pub Map<String, Value>);

impl RawBinding {
    /// Create an empty binding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plain literal term (builder style, mostly for tests and demos).
    pub fn with_literal(mut self, field: &str, value: &str) -> Self {
        self.0.insert(
            field.to_string(),
            serde_json::json!({ "type": "literal", "value": value }),
        );
        self
    }

    /// Add an arbitrary term object.
    pub fn with_term(mut self, field: &str, term: Value) -> Self {
        self.0.insert(field.to_string(), term);
        self
    }

    /// The full term object bound to `field`, if any.
    pub fn term(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// The `value` of the term bound to `field`, when it is a string.
    pub fn literal(&self, field: &str) -> Option<&str> {
        self.term(field)
            .and_then(|term| term.get("value"))
            .and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for RawBinding {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// A normalized book record.
///
/// Serializes to the flat `{ book, title, authors, abstract }` object
/// returned by the `/book_info` route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// DBpedia resource URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book: Option<String>,
    /// Book title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Deduplicated author names joined with [`AUTHOR_SEPARATOR`].
    pub authors: String,
    /// Abstract text.
    #[serde(
        rename = "abstract",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub abstract_text: Option<String>,
}

impl Record {
    /// Iterate over the individual author names.
    pub fn author_names(&self) -> impl Iterator<Item = &str> {
        self.authors
            .split(AUTHOR_SEPARATOR)
            .filter(|name| !name.is_empty())
    }
}
