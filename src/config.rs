//! Runtime configuration, read from the environment.
//!
//! | Variable                 | Default                      |
//! |--------------------------|------------------------------|
//! | `BOOK_INFO_ENDPOINT`     | `https://dbpedia.org/sparql` |
//! | `BOOK_INFO_URIS_FILE`    | `uris.json`                  |
//! | `BOOK_INFO_PUBLIC_DIR`   | `public`                     |
//! | `BOOK_INFO_LANG`         | `en`                         |
//! | `BOOK_INFO_TIMEOUT_SECS` | `30`                         |
//! | `PORT`                   | `3000`                       |

use crate::client::DEFAULT_ENDPOINT;
use crate::error::{Error, Result};
use crate::query::DEFAULT_LANGUAGE;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// SPARQL endpoint queried for book data.
    pub endpoint: Url,
    /// JSON file holding the fallback identifier list.
    pub uris_file: PathBuf,
    /// Directory served for every non-API path.
    pub public_dir: PathBuf,
    /// Language tag for titles, abstracts, and author names.
    pub language: String,
    /// Timeout for a single endpoint request.
    pub timeout: Duration,
    /// TCP port the HTTP service listens on.
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            uris_file: PathBuf::from("uris.json"),
            public_dir: PathBuf::from("public"),
            language: DEFAULT_LANGUAGE.to_string(),
            timeout: Duration::from_secs(30),
            port: 3000,
        }
    }
}

impl Config {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Unset and empty variables fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(endpoint) = get("BOOK_INFO_ENDPOINT") {
            config.endpoint = Url::parse(&endpoint).map_err(|e| {
                Error::Config(format!("BOOK_INFO_ENDPOINT '{}' is not a URL: {}", endpoint, e))
            })?;
        }
        if let Some(path) = get("BOOK_INFO_URIS_FILE") {
            config.uris_file = PathBuf::from(path);
        }
        if let Some(dir) = get("BOOK_INFO_PUBLIC_DIR") {
            config.public_dir = PathBuf::from(dir);
        }
        if let Some(lang) = get("BOOK_INFO_LANG") {
            config.language = lang;
        }
        if let Some(secs) = get("BOOK_INFO_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                Error::Config(format!("BOOK_INFO_TIMEOUT_SECS '{}' is not a number", secs))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(port) = get("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("PORT '{}' is not a valid port", port)))?;
        }

        Ok(config)
    }

    /// Override the listening port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}
