//! Error types for data message decoding.

use sdmx_structure::{ParseError, StructureError};
use thiserror::Error;

/// Boxed error returned by a [`crate::MetadataSource`].
pub type SourceError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error type for decoding operations.
///
/// Every error is terminal for the decode in progress; no partial recovery
/// is attempted.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The data message could not be read or did not have the expected shape.
    #[error("XML error: {0}")]
    Xml(#[from] sdmx_core::Error),

    /// A metadata document could not be parsed.
    #[error("metadata parse error: {0}")]
    Parse(#[from] ParseError),

    /// A reference into a metadata document could not be resolved.
    #[error("metadata error: {0}")]
    Structure(#[from] StructureError),

    /// Key family cannot be inferred because the metadata document does not
    /// define exactly one.
    #[error("expected exactly one key family in metadata document, found {count}")]
    AmbiguousKeyFamily {
        /// Number of key families in the document.
        count: usize,
    },

    /// Dataset has no `keyFamilyURI` and no default metadata was supplied.
    #[error("dataset {dataset} has no keyFamilyURI and no default metadata is configured")]
    MissingMetadata {
        /// Zero-based dataset position in the message.
        dataset: usize,
    },

    /// Dataset references metadata by URI but no source is configured.
    #[error("cannot fetch '{url}': no metadata source is configured")]
    NoSource {
        /// Referenced URI.
        url: String,
    },

    /// Observation time uses a code list but no language was given.
    #[error("observation time uses code list '{code_list}', but no language was specified")]
    MissingLanguage {
        /// Code list of the time dimension.
        code_list: String,
    },

    /// A coded value resolved to a label chain where a single label was
    /// required.
    #[error("code '{value}' resolves to {} labels, expected exactly one", .labels.len())]
    UnsupportedHierarchy {
        /// Raw code value.
        value: String,
        /// Resolved labels, root first.
        labels: Vec<String>,
    },

    /// Required attribute missing on a data element.
    #[error("missing required attribute '{attribute}' on element '{element}'")]
    MissingAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: &'static str,
    },

    /// Required child element missing.
    #[error("element '{parent}' has no '{element}' child")]
    MissingElement {
        /// Parent element name.
        parent: &'static str,
        /// Missing child name.
        element: &'static str,
    },

    /// The metadata source failed to deliver a document.
    #[error("failed to fetch metadata from '{url}': {source}")]
    Fetch {
        /// Requested URI.
        url: String,
        /// Error reported by the source.
        source: SourceError,
    },
}

impl DecodeError {
    /// Creates a missing attribute error.
    pub fn missing_attr(element: impl Into<String>, attribute: &'static str) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute,
        }
    }
}

/// Result type for decoding operations.
pub type Result<T> = std::result::Result<T, DecodeError>;
