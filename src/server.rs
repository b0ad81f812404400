//! HTTP service exposing the book-info lookup.
//!
//! Routes:
//! - `GET|POST /book_info`: optional JSON array body of resource URIs;
//!   falls back to the configured URI list when absent or empty
//! - `GET /health`
//! - everything else is served from the public directory

use crate::client::SparqlClient;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::identifiers::FallbackFileSource;
use crate::lookup::BookLookup;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!("book info lookup failed: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

/// Build the router around a lookup handler.
pub fn build_router(lookup: BookLookup, public_dir: impl AsRef<Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/book_info", get(book_info).post(book_info))
        .route("/health", get(health_check))
        .with_state(lookup)
        .fallback_service(ServeDir::new(public_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Build the production lookup handler from configuration.
pub fn lookup_from_config(config: &Config) -> Result<BookLookup> {
    let client = SparqlClient::from_config(config)?;
    let identifiers = FallbackFileSource::new(&config.uris_file);
    Ok(BookLookup::new(
        Arc::new(client),
        Arc::new(identifiers),
        config.language.clone(),
    ))
}

/// Bind to `config.port` on all interfaces and serve until the process exits.
pub async fn serve(config: Config) -> Result<()> {
    let lookup = lookup_from_config(&config)?;
    let app = build_router(lookup, &config.public_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        endpoint = %config.endpoint,
        uris_file = %config.uris_file.display(),
        "book info service listening on {}",
        addr
    );

    axum::serve(listener, app).await?;
    Ok(())
}

/// Identifiers carried by a request body, if it holds a JSON array of strings.
fn requested_identifiers(body: &[u8]) -> Option<Vec<String>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    match serde_json::from_slice::<Vec<String>>(body) {
        Ok(ids) => Some(ids),
        Err(e) => {
            tracing::debug!("ignoring request body that is not a URI list: {}", e);
            None
        }
    }
}

async fn book_info(State(lookup): State<BookLookup>, body: Bytes) -> Response {
    match lookup.handle(requested_identifiers(&body)).await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "dbpedia-books",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
