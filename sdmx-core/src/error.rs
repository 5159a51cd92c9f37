//! Error types for XML reading and cursor traversal.

use thiserror::Error;

/// Core error type for reading SDMX-ML documents.
#[derive(Debug, Error)]
pub enum Error {
    /// XML tokenizer error.
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed escape sequence in an attribute value.
    #[error("invalid escape sequence: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    /// Invalid character reference in text content.
    #[error("invalid character reference '&{reference};'")]
    InvalidCharRef {
        /// Reference body, without the leading `&` and trailing `;`.
        reference: String,
    },

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// IO error from the underlying byte source.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The document does not have the shape the reader expects at this point.
    #[error("structural mismatch: expected {expected}, found {found}")]
    StructuralMismatch {
        /// What the reader was looking for.
        expected: String,
        /// What the document contained instead.
        found: String,
    },

    /// The byte source ended inside an open element.
    #[error("unexpected end of document while reading {context}")]
    UnexpectedEof {
        /// Element that was open when the input ended.
        context: String,
    },

    /// A previous operation on a forward-only cursor failed.
    #[error("cursor is in a failed state after an earlier error")]
    CursorFailed,
}

impl Error {
    /// Creates a structural mismatch error.
    pub fn mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::StructuralMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Creates an unexpected end-of-document error.
    pub fn eof(context: impl Into<String>) -> Self {
        Self::UnexpectedEof {
            context: context.into(),
        }
    }
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
