//! Metadata document retrieval and caching.
//!
//! A data message names its metadata document by URI (`keyFamilyURI`).
//! Retrieving the bytes is delegated to a [`MetadataSource`]; the
//! [`FetchCache`] parses each document once and hands out shared,
//! immutable copies for the rest of the session.

use crate::error::{DecodeError, Result, SourceError};
use parking_lot::Mutex;
use sdmx_structure::{MetadataDocument, read_structure, validate_structure};
use std::collections::HashMap;
use std::io::{BufReader, Read};
use std::sync::Arc;
use thiserror::Error;

/// Byte-stream collaborator for metadata documents.
///
/// Any error is reported to the caller unchanged; retries and timeouts are
/// the source's own concern.
pub trait MetadataSource: Send + Sync {
    /// Opens the document published at `url`.
    ///
    /// # Errors
    /// Returns the source's error if the document cannot be retrieved.
    fn get(&self, url: &str) -> std::result::Result<Box<dyn Read + '_>, SourceError>;
}

impl<F> MetadataSource for F
where
    F: Fn(&str) -> std::result::Result<Vec<u8>, SourceError> + Send + Sync,
{
    fn get(&self, url: &str) -> std::result::Result<Box<dyn Read + '_>, SourceError> {
        let bytes = self(url)?;
        Ok(Box::new(std::io::Cursor::new(bytes)))
    }
}

/// Error returned by [`StaticSource`] for an unregistered URI.
#[derive(Debug, Error)]
#[error("no metadata document registered for '{url}'")]
pub struct NotFound {
    /// Requested URI.
    pub url: String,
}

/// In-memory source serving documents registered up front.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    documents: HashMap<String, Vec<u8>>,
}

impl StaticSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a document, builder style.
    #[must_use]
    pub fn with_document(mut self, url: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(url, bytes);
        self
    }

    /// Registers a document.
    pub fn insert(&mut self, url: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.documents.insert(url.into(), bytes.into());
    }
}

impl MetadataSource for StaticSource {
    fn get(&self, url: &str) -> std::result::Result<Box<dyn Read + '_>, SourceError> {
        match self.documents.get(url) {
            Some(bytes) => Ok(Box::new(bytes.as_slice())),
            None => Err(Box::new(NotFound {
                url: url.to_string(),
            })),
        }
    }
}

/// Per-session memo of parsed metadata documents, keyed by URI.
///
/// The lock is held across check, fetch and insert, so concurrent first
/// requests for a URI still reach the source exactly once. Entries are
/// never evicted.
pub struct FetchCache {
    source: Option<Arc<dyn MetadataSource>>,
    validate: bool,
    entries: Mutex<HashMap<String, Arc<MetadataDocument>>>,
}

impl FetchCache {
    /// Creates an empty cache over `source`.
    #[must_use]
    pub fn new(source: Option<Arc<dyn MetadataSource>>) -> Self {
        Self {
            source,
            validate: false,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Runs semantic validation on every fetched document.
    #[must_use]
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Returns the parsed document published at `url`, fetching it on
    /// first use.
    ///
    /// # Errors
    /// Returns `DecodeError::NoSource` if no source is configured,
    /// `DecodeError::Fetch` if the source fails, or the parse/validation
    /// error of the retrieved document. Failures are not cached.
    pub fn fetch(&self, url: &str) -> Result<Arc<MetadataDocument>> {
        let mut entries = self.entries.lock();
        if let Some(metadata) = entries.get(url) {
            tracing::debug!(url, "metadata document served from cache");
            return Ok(Arc::clone(metadata));
        }

        let source = self.source.as_ref().ok_or_else(|| DecodeError::NoSource {
            url: url.to_string(),
        })?;
        tracing::debug!(url, "fetching metadata document");
        let reader = source.get(url).map_err(|source| DecodeError::Fetch {
            url: url.to_string(),
            source,
        })?;
        let metadata = read_structure(BufReader::new(reader))?;
        if self.validate {
            validate_structure(&metadata)?;
        }

        let metadata = Arc::new(metadata);
        entries.insert(url.to_string(), Arc::clone(&metadata));
        Ok(metadata)
    }

    /// Returns true if `url` has already been fetched.
    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        self.entries.lock().contains_key(url)
    }

    /// Number of cached documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns true if nothing has been fetched yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl std::fmt::Debug for FetchCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchCache")
            .field("has_source", &self.source.is_some())
            .field("validate", &self.validate)
            .field("entries", &self.len())
            .finish()
    }
}
