//! SPARQL query builder for book lookups.
//!
//! Embeds the requested resource URIs in a `FILTER (?book IN (...))`
//! clause over a fixed book schema.
//!
//! # Example
//!
//! ```
//! use dbpedia_books::BookQuery;
//!
//! let query = BookQuery::new(["http://dbpedia.org/resource/Dune_(novel)"]).build();
//! assert!(query.contains("FILTER (?book IN (<http://dbpedia.org/resource/Dune_(novel)>))"));
//! assert!(query.contains(r#"separator=" & ""#));
//! ```

use crate::types::AUTHOR_SEPARATOR;

/// Language tag applied to titles, abstracts, and author names by default.
pub const DEFAULT_LANGUAGE: &str = "en";

const PREFIXES: &str = "\
PREFIX dbo: <http://dbpedia.org/ontology/>
PREFIX dbp: <http://dbpedia.org/property/>
PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>
";

/// Builder for the book-info SPARQL query.
#[derive(Debug, Clone)]
pub struct BookQuery {
    identifiers: Vec<String>,
    language: String,
}

impl BookQuery {
    /// Create a query for the given resource URIs.
    ///
    /// Identifiers are used verbatim, in order, duplicates included.
    pub fn new<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            identifiers: identifiers.into_iter().map(Into::into).collect(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Restrict literals to another language tag (e.g. "fr").
    pub fn language(mut self, tag: &str) -> Self {
        self.language = tag.to_string();
        self
    }

    /// The identifiers this query filters on.
    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    /// The `?book IN (...)` member list: `<a>, <b>, ...`.
    ///
    /// Empty when there are no identifiers, which makes the filter match
    /// nothing.
    pub fn filter_list(&self) -> String {
        self.identifiers
            .iter()
            .map(|id| format!("<{}>", id))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Build the final query string.
    pub fn build(self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for BookQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lang = &self.language;
        write!(
            f,
            "{prefixes}\
SELECT ?book ?title (GROUP_CONCAT(DISTINCT ?authors; separator=\"{sep}\") AS ?authors) ?abstract
WHERE {{
  ?book a dbo:Book .
  {{
    ?book ?p ?authors .
    FILTER (?p = dbp:author || ?p = dbp:authors)
  }}
  UNION
  {{
    ?book ?p ?auth .
    ?auth ?n ?authors .
    FILTER (?p = dbp:author || ?p = dbp:authors)
    FILTER (?n = dbp:name || ?n = rdfs:label)
  }}
  ?book rdfs:label ?title .
  ?book dbo:abstract ?abstract .
  FILTER (langMatches(lang(?abstract), \"{lang}\"))
  FILTER (langMatches(lang(?title), \"{lang}\"))
  FILTER (langMatches(lang(?authors), \"{lang}\"))
  FILTER (?book IN ({filter}))
}}
GROUP BY ?book ?title ?abstract
",
            prefixes = PREFIXES,
            sep = AUTHOR_SEPARATOR,
            lang = lang,
            filter = self.filter_list(),
        )
    }
}
