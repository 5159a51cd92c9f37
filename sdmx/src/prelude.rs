//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use sdmx::prelude::*;
//! ```

// Core types
pub use sdmx_core::{Cursor, Document, StreamCursor, TreeCursor, XmlReader};
pub use sdmx_core::error::{Error as CoreError, Result as CoreResult};

// Structure types
pub use sdmx_structure::{
    Code, CodeList, Concept, DescribedKey, Dimension, DimensionRole, KeyFamily, MetadataDocument,
    ParseError, StructureError, parse_structure, read_structure, validate_structure,
};

// Data types
pub use sdmx_data::{
    DataFormat, Dataset, DatasetReader, DecodeError, Decoder, DecoderBuilder, Format,
    KeyFamilyView, Message, MessageReader, MetadataSource, Observation, Series, SeriesKey,
    SeriesReader, StaticSource,
};
