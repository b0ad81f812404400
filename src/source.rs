//! The binding source seam between query transport and normalization.

use crate::error::Result;
use crate::types::RawBinding;
use async_trait::async_trait;
use futures::stream::BoxStream;

/// A finite, non-restartable stream of bindings.
///
/// `None` from the stream means the source completed normally; an `Err`
/// item means it failed.
pub type BindingStream = BoxStream<'static, Result<RawBinding>>;

/// Executes a SPARQL query and yields its result rows.
#[async_trait]
pub trait BindingSource: Send + Sync {
    /// Run `query` and return the stream of bindings it produced.
    ///
    /// Errors raised before the first row (connection refused, bad
    /// status) come back directly; later failures arrive as stream items.
    async fn bindings(&self, query: &str) -> Result<BindingStream>;
}

/// A source that replays a fixed list of bindings for every query.
///
/// Handy for demos and offline tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    bindings: Vec<RawBinding>,
}

impl StaticSource {
    /// Create a source that always yields `bindings`.
    pub fn new(bindings: Vec<RawBinding>) -> Self {
        Self { bindings }
    }
}

#[async_trait]
impl BindingSource for StaticSource {
    async fn bindings(&self, _query: &str) -> Result<BindingStream> {
        let items: Vec<Result<RawBinding>> = self.bindings.iter().cloned().map(Ok).collect();
        Ok(Box::pin(futures::stream::iter(items)))
    }
}
