//! # SDMX Structure
//!
//! SDMX-ML 2.0 structure (DSD) reader and metadata model.
//!
//! This crate provides:
//! - Parsing of structure messages into concepts, code lists and key families
//! - Identifier lookups that report unknown ids as absent
//! - Code hierarchy resolution into root-first label chains
//! - Series key description against a key family
//! - Semantic validation of a parsed document

pub mod error;
pub mod hierarchy;
pub mod key;
pub mod parser;
pub mod types;
pub mod validation;

pub use error::{ParseError, StructureError};
pub use hierarchy::{ancestry, describe_code};
pub use key::{DescribedKey, describe_dimensions, describe_key, describe_value};
pub use parser::{from_document, parse_structure, read_structure};
pub use types::{
    Code, CodeList, Concept, Dimension, DimensionRole, KeyFamily, LocalizedText, MetadataDocument,
};
pub use validation::validate_structure;
