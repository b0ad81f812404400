//! SPARQL 1.1 JSON results parsing.

use crate::error::{Error, Result};
use crate::types::RawBinding;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Media type requested from the endpoint.
pub const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// Top-level SPARQL results document.
#[derive(Debug, Deserialize)]
pub(crate) struct SparqlResponse {
    #[serde(default)]
    pub head: SparqlHead,
    pub results: SparqlResults,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SparqlHead {
    #[serde(default)]
    pub vars: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SparqlResults {
    pub bindings: Vec<Map<String, Value>>,
}

/// Parse a SPARQL JSON results body into its bindings, in document order.
pub fn parse_bindings(json: &str) -> Result<Vec<RawBinding>> {
    let response: SparqlResponse = serde_json::from_str(json)
        .map_err(|e| Error::Parse(format!("Invalid SPARQL JSON results: {}", e)))?;

    tracing::trace!(vars = ?response.head.vars, rows = response.results.bindings.len(), "parsed SPARQL results");

    Ok(response
        .results
        .bindings
        .into_iter()
        .map(RawBinding::from)
        .collect())
}
