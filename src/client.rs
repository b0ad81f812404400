//! HTTP client for a SPARQL endpoint.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::parse::{parse_bindings, SPARQL_RESULTS_JSON};
use crate::source::{BindingSource, BindingStream};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// DBpedia's public endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://dbpedia.org/sparql";

const USER_AGENT: &str = concat!("dbpedia-books/", env!("CARGO_PKG_VERSION"));

/// Async client for a SPARQL 1.1 protocol endpoint.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> dbpedia_books::error::Result<()> {
/// let client = dbpedia_books::SparqlClient::new("https://dbpedia.org/sparql")?;
/// let records = client
///     .book_info(&["http://dbpedia.org/resource/Good_Omens".to_string()])
///     .await?;
/// for record in &records {
///     println!("{:?} by {}", record.title, record.authors);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct SparqlClient {
    pub(crate) http: Client,
    pub(crate) endpoint: Url,
    pub(crate) language: String,
}

impl SparqlClient {
    /// Create a client for `endpoint` with a 30 second timeout.
    pub fn new(endpoint: &str) -> Result<Self> {
        Self::with_timeout(endpoint, Duration::from_secs(30))
    }

    /// Create a client with an explicit request timeout.
    pub fn with_timeout(endpoint: &str, timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| Error::Config(format!("invalid endpoint URL '{}': {}", endpoint, e)))?;
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            endpoint,
            language: crate::query::DEFAULT_LANGUAGE.to_string(),
        })
    }

    /// Create a client from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::with_timeout(config.endpoint.as_str(), config.timeout)?
            .with_language(&config.language))
    }

    /// Override the language tag used by [`SparqlClient::book_info`].
    pub fn with_language(mut self, tag: &str) -> Self {
        self.language = tag.to_string();
        self
    }

    /// The endpoint this client talks to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// POST a query and return the raw results body.
    pub async fn post_query(&self, query: &str) -> Result<String> {
        tracing::debug!(endpoint = %self.endpoint, bytes = query.len(), "sending SPARQL query");

        let response = self
            .http
            .post(self.endpoint.clone())
            .header("Accept", SPARQL_RESULTS_JSON)
            .header("User-Agent", USER_AGENT)
            .form(&[("query", query)])
            .send()
            .await?;

        handle_response(response).await
    }
}

#[async_trait]
impl BindingSource for SparqlClient {
    async fn bindings(&self, query: &str) -> Result<BindingStream> {
        let body = self.post_query(query).await?;
        let rows = parse_bindings(&body)?;
        tracing::debug!(rows = rows.len(), "received bindings");
        Ok(Box::pin(futures::stream::iter(
            rows.into_iter().map(Ok::<_, Error>),
        )))
    }
}

/// Handle the HTTP response, mapping status codes to errors.
async fn handle_response(response: reqwest::Response) -> Result<String> {
    let status = response.status().as_u16();

    match status {
        200..=299 => Ok(response.text().await?),
        404 => Err(Error::NotFound(format!(
            "SPARQL endpoint {} not found",
            response.url()
        ))),
        _ => {
            let body = response.text().await.unwrap_or_default();
            Err(Error::Endpoint {
                status,
                message: body,
            })
        }
    }
}
