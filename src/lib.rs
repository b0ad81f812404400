//! # dbpedia-books
//!
//! Looks up bibliographic records (title, authors, abstract) for DBpedia
//! resources and returns them as clean JSON.
//!
//! Provides:
//! - **Library**: SPARQL query builder, endpoint client, and the
//!   binding-to-record normalization pipeline
//! - **Service**: an axum router exposing `/book_info` (feature `server`, on by default)
//! - **CLI**: `book-info` binary with `serve`, `lookup`, and `query` (feature `cli`)
//!
//! ## Quick Start
//!
//! ```no_run
//! # async fn example() -> dbpedia_books::error::Result<()> {
//! use dbpedia_books::SparqlClient;
//!
//! let client = SparqlClient::new("https://dbpedia.org/sparql")?;
//! let records = client
//!     .book_info(&["http://dbpedia.org/resource/Good_Omens".to_string()])
//!     .await?;
//! println!("{}", serde_json::to_string_pretty(&records)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Normalization
//!
//! Every binding becomes one [`Record`]. Author lists are split on
//! [`AUTHOR_SEPARATOR`], stripped of blanks, and deduplicated without
//! regard to case:
//!
//! ```
//! use dbpedia_books::{normalize_binding, RawBinding};
//!
//! let binding = RawBinding::new()
//!     .with_literal("title", "Good Omens")
//!     .with_literal("authors", "Terry Pratchett & terry pratchett & Neil Gaiman & ");
//! let record = normalize_binding(&binding).unwrap();
//! assert_eq!(record.authors, "Terry Pratchett & Neil Gaiman");
//! ```

pub mod aggregate;
pub mod client;
pub mod config;
pub mod error;
pub mod identifiers;
pub mod lookup;
pub mod normalize;
pub mod parse;
pub mod query;
pub mod source;
pub mod types;

#[cfg(feature = "server")]
pub mod server;

// Re-export key types at the crate root.
pub use aggregate::{aggregate, Aggregator, AggregatorState};
pub use client::SparqlClient;
pub use config::Config;
pub use error::Error;
pub use identifiers::{FallbackFileSource, IdentifierSource, StaticIdentifiers};
pub use lookup::{lookup_books, BookLookup};
pub use normalize::{dedup_authors, normalize_binding};
pub use query::BookQuery;
pub use source::{BindingSource, BindingStream, StaticSource};
pub use types::*;
