//! Collects a binding stream into an ordered list of records.
//!
//! The aggregation is all-or-nothing: the first source error or malformed
//! binding fails the whole run and the records buffered so far are
//! discarded.

use crate::error::{Error, Result};
use crate::normalize::normalize_binding;
use crate::types::{RawBinding, Record};
use futures::{Stream, StreamExt};

/// Lifecycle of an [`Aggregator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregatorState {
    /// Nothing consumed yet.
    Pending,
    /// At least one binding accepted; more may follow.
    Collecting,
    /// The source completed and the records were handed out.
    Done,
    /// A binding or the source failed; no records will be returned.
    Failed,
}

/// Accumulates normalized records in arrival order.
#[derive(Debug)]
pub struct Aggregator {
    state: AggregatorState,
    records: Vec<Record>,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl Aggregator {
    /// Create a new aggregator in the `Pending` state.
    pub fn new() -> Self {
        Self {
            state: AggregatorState::Pending,
            records: Vec::new(),
        }
    }

    /// Current state.
    pub fn state(&self) -> AggregatorState {
        self.state
    }

    /// Number of records buffered so far.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no records have been buffered.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Normalize one binding and append the record.
    ///
    /// A malformed binding moves the aggregator to `Failed` and the
    /// normalization error is returned.
    pub fn accept(&mut self, binding: &RawBinding) -> Result<()> {
        self.ensure_open("accept a binding")?;
        self.state = AggregatorState::Collecting;

        match normalize_binding(binding) {
            Ok(record) => {
                self.records.push(record);
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Mark the aggregation failed, dropping every buffered record.
    ///
    /// Returns the error so callers can propagate it directly.
    pub fn fail(&mut self, error: Error) -> Error {
        tracing::debug!(
            discarded = self.records.len(),
            error = %error,
            "aggregation failed"
        );
        self.state = AggregatorState::Failed;
        self.records.clear();
        error
    }

    /// Complete the aggregation and take the records.
    pub fn finish(&mut self) -> Result<Vec<Record>> {
        self.ensure_open("finish")?;
        self.state = AggregatorState::Done;
        let records = std::mem::take(&mut self.records);
        tracing::debug!(records = records.len(), "aggregation done");
        Ok(records)
    }

    fn ensure_open(&self, action: &str) -> Result<()> {
        match self.state {
            AggregatorState::Pending | AggregatorState::Collecting => Ok(()),
            AggregatorState::Done | AggregatorState::Failed => Err(Error::Aggregation(format!(
                "cannot {} in state {:?}",
                action, self.state
            ))),
        }
    }
}

/// Drain a binding stream into records, stopping at the first failure.
///
/// Records come back in the order the stream produced the bindings. The
/// rest of the stream is dropped unread once an item fails.
pub async fn aggregate<S>(bindings: S) -> Result<Vec<Record>>
where
    S: Stream<Item = Result<RawBinding>>,
{
    let mut aggregator = Aggregator::new();
    futures::pin_mut!(bindings);

    while let Some(item) = bindings.next().await {
        match item {
            Ok(binding) => aggregator.accept(&binding)?,
            Err(e) => return Err(aggregator.fail(e)),
        }
    }

    aggregator.finish()
}
