//! Error types for metadata parsing and resolution.

use thiserror::Error;

/// Error type for reading a metadata (structure) document.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The document could not be read as XML.
    #[error("XML error: {0}")]
    Xml(#[from] sdmx_core::Error),

    /// Missing required attribute.
    #[error("missing required attribute '{attribute}' on element '{element}'")]
    MissingAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
    },

    /// An element that may occur at most once occurs again.
    #[error("duplicate {kind} in '{id}'")]
    DuplicateDefinition {
        /// Element kind (`TimeDimension`, `PrimaryMeasure`).
        kind: String,
        /// Identifier of the enclosing definition.
        id: String,
    },
}

/// Error type for lookups and resolution against a parsed metadata document.
#[derive(Debug, Error)]
pub enum StructureError {
    /// Concept not defined in the document.
    #[error("concept '{id}' not found")]
    UnknownConcept {
        /// Concept identifier.
        id: String,
    },

    /// Code list not defined in the document.
    #[error("code list '{id}' not found")]
    UnknownCodeList {
        /// Code list identifier.
        id: String,
    },

    /// Code value not present in its code list.
    #[error("code '{value}' not found in code list '{code_list}'")]
    UnknownCode {
        /// Code list identifier.
        code_list: String,
        /// Code value.
        value: String,
    },

    /// Key family not defined in the document.
    #[error("key family '{id}' not found")]
    UnknownKeyFamily {
        /// Key family identifier.
        id: String,
    },

    /// No name or description in the requested language.
    #[error("{kind} '{id}' has no label in language '{lang}'")]
    MissingLabel {
        /// Kind of entity (concept, code, key family).
        kind: &'static str,
        /// Entity identifier.
        id: String,
        /// Requested language.
        lang: String,
    },

    /// Key family lacks a required component.
    #[error("key family '{key_family}' has no {component}")]
    MissingComponent {
        /// Key family identifier.
        key_family: String,
        /// Component kind.
        component: &'static str,
    },

    /// Parent chain of a code loops back on itself.
    #[error("cyclic parent chain at code '{value}' in code list '{code_list}'")]
    CyclicHierarchy {
        /// Code list identifier.
        code_list: String,
        /// Code at which the cycle was detected.
        value: String,
    },

    /// A series key lacks a value for one of the key family's dimensions.
    #[error("series key has no value for dimension '{concept}' of key family '{key_family}'")]
    MissingKeyValue {
        /// Key family identifier.
        key_family: String,
        /// Concept reference of the dimension.
        concept: String,
    },

    /// A series key has more than one value for one of the key family's
    /// dimensions.
    #[error("series key has several values for dimension '{concept}' of key family '{key_family}'")]
    DuplicateKeyValue {
        /// Key family identifier.
        key_family: String,
        /// Concept reference of the dimension.
        concept: String,
    },

    /// Validation error.
    #[error("validation error: {message}")]
    Validation {
        /// Error message.
        message: String,
    },
}

impl ParseError {
    /// Creates a missing attribute error.
    pub fn missing_attr(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Creates a duplicate definition error.
    pub fn duplicate(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self::DuplicateDefinition {
            kind: kind.into(),
            id: id.into(),
        }
    }
}

impl StructureError {
    /// Creates an unknown code error.
    pub fn unknown_code(code_list: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UnknownCode {
            code_list: code_list.into(),
            value: value.into(),
        }
    }

    /// Creates a missing label error.
    pub fn missing_label(kind: &'static str, id: impl Into<String>, lang: impl Into<String>) -> Self {
        Self::MissingLabel {
            kind,
            id: id.into(),
            lang: lang.into(),
        }
    }
}
