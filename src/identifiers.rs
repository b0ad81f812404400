//! Resolution of the identifier list for a lookup request.
//!
//! A caller-supplied, non-empty list always wins. Otherwise the source's
//! fallback list is used.

use crate::error::{Error, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Supplies the identifiers a request should look up.
#[async_trait]
pub trait IdentifierSource: Send + Sync {
    /// Resolve the identifiers for a request.
    ///
    /// `requested` is the list parsed from the request, if it carried one.
    async fn resolve(&self, requested: Option<Vec<String>>) -> Result<Vec<String>>;
}

fn non_empty(requested: Option<Vec<String>>) -> Option<Vec<String>> {
    requested.filter(|ids| !ids.is_empty())
}

/// Falls back to a JSON array of URIs stored on disk.
///
/// The file is read on every fallback so edits show up without a restart.
#[derive(Debug, Clone)]
pub struct FallbackFileSource {
    path: PathBuf,
}

impl FallbackFileSource {
    /// Use the JSON file at `path` as the fallback list.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the fallback file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the fallback file.
    pub async fn load(&self) -> Result<Vec<String>> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            Error::Identifiers(format!("cannot read {}: {}", self.path.display(), e))
        })?;
        serde_json::from_str(&contents).map_err(|e| {
            Error::Identifiers(format!(
                "{} is not a JSON array of strings: {}",
                self.path.display(),
                e
            ))
        })
    }
}

#[async_trait]
impl IdentifierSource for FallbackFileSource {
    async fn resolve(&self, requested: Option<Vec<String>>) -> Result<Vec<String>> {
        if let Some(ids) = non_empty(requested) {
            return Ok(ids);
        }
        tracing::debug!(path = %self.path.display(), "no identifiers in request, using fallback file");
        self.load().await
    }
}

/// Falls back to a fixed in-memory list.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentifiers {
    fallback: Vec<String>,
}

impl StaticIdentifiers {
    /// Use `fallback` when a request carries no identifiers.
    pub fn new(fallback: Vec<String>) -> Self {
        Self { fallback }
    }
}

#[async_trait]
impl IdentifierSource for StaticIdentifiers {
    async fn resolve(&self, requested: Option<Vec<String>>) -> Result<Vec<String>> {
        Ok(non_empty(requested).unwrap_or_else(|| self.fallback.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn fallback_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_request_list_wins() {
        let source = FallbackFileSource::new("/does/not/exist.json");
        let ids = source.resolve(Some(vec!["a".into(), "a".into()])).await.unwrap();
        assert_eq!(ids, vec!["a", "a"]);
    }

    #[tokio::test]
    async fn test_empty_request_reads_file() {
        let file = fallback_file(r#"["http://dbpedia.org/resource/Dune_(novel)"]"#);
        let source = FallbackFileSource::new(file.path());

        assert_eq!(
            source.resolve(Some(vec![])).await.unwrap(),
            vec!["http://dbpedia.org/resource/Dune_(novel)"]
        );
        assert_eq!(source.resolve(None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let source = FallbackFileSource::new("/does/not/exist.json");
        let err = source.resolve(None).await.unwrap_err();
        assert!(matches!(err, Error::Identifiers(_)));
    }

    #[tokio::test]
    async fn test_file_with_wrong_shape() {
        let file = fallback_file(r#"{"uris": []}"#);
        let err = FallbackFileSource::new(file.path()).load().await.unwrap_err();
        assert!(err.to_string().contains("not a JSON array of strings"));
    }

    #[tokio::test]
    async fn test_static_identifiers() {
        let source = StaticIdentifiers::new(vec!["x".into()]);
        assert_eq!(source.resolve(None).await.unwrap(), vec!["x"]);
        assert_eq!(source.resolve(Some(vec!["y".into()])).await.unwrap(), vec!["y"]);
        assert!(StaticIdentifiers::default().resolve(None).await.unwrap().is_empty());
    }
}
