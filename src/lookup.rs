//! Book-info lookup: identifiers in, normalized records out.

use crate::aggregate::aggregate;
use crate::client::SparqlClient;
use crate::error::Result;
use crate::identifiers::IdentifierSource;
use crate::query::BookQuery;
use crate::source::BindingSource;
use crate::types::Record;
use std::sync::Arc;

/// Query `source` for the given identifiers and collect the records.
pub async fn lookup_books(
    source: &dyn BindingSource,
    identifiers: &[String],
    language: &str,
) -> Result<Vec<Record>> {
    let query = BookQuery::new(identifiers.iter().cloned())
        .language(language)
        .build();
    let bindings = source.bindings(&query).await?;
    aggregate(bindings).await
}

/// Request handler wiring an identifier source to a binding source.
///
/// Cheap to clone; each call runs its own query and aggregation.
#[derive(Clone)]
pub struct BookLookup {
    source: Arc<dyn BindingSource>,
    identifiers: Arc<dyn IdentifierSource>,
    language: String,
}

impl BookLookup {
    /// Create a handler from its collaborators.
    pub fn new(
        source: Arc<dyn BindingSource>,
        identifiers: Arc<dyn IdentifierSource>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            source,
            identifiers,
            language: language.into(),
        }
    }

    /// Resolve the identifiers for a request and look them up.
    pub async fn handle(&self, requested: Option<Vec<String>>) -> Result<Vec<Record>> {
        let ids = self.identifiers.resolve(requested).await?;
        tracing::info!(identifiers = ids.len(), "book info lookup");

        let records = lookup_books(self.source.as_ref(), &ids, &self.language).await?;
        tracing::info!(records = records.len(), "book info lookup complete");
        Ok(records)
    }
}

impl SparqlClient {
    /// Fetch normalized records for the given DBpedia resource URIs.
    pub async fn book_info(&self, identifiers: &[String]) -> Result<Vec<Record>> {
        lookup_books(self, identifiers, &self.language).await
    }
}
