//! # SDMX
//!
//! Decoding of SDMX-ML 2.0 statistical data messages for Rust.
//!
//! A data message only carries raw codes; what they mean lives in a separate
//! structure document (the key family, its concepts and code lists). This
//! crate reads both and turns series keys into labelled dimensions.
//!
//! ## Features
//!
//! - **Generic and compact messages** - Both SDMX-ML 2.0 data layouts
//! - **Tree or stream** - Decode a parsed document with random access, or a
//!   message of any size in a single forward pass
//! - **Hierarchical codes** - Child codes are described with their ancestors
//! - **Metadata fetching** - Documents named by `keyFamilyURI` are retrieved
//!   through a pluggable source and cached per session
//!
//! ## Quick Start
//!
//! ```ignore
//! use sdmx::prelude::*;
//!
//! let decoder = Decoder::builder()
//!     .source(StaticSource::new().with_document(dsd_url, dsd_bytes))
//!     .build()?;
//!
//! let mut message = decoder.stream(std::io::BufReader::new(file));
//! while let Some(mut dataset) = message.next_dataset()? {
//!     while let Some(mut series) = dataset.next_series()? {
//!         println!("{:?}", series.describe_key("en")?);
//!         for observation in series.observations(None)? {
//!             let observation = observation?;
//!             println!("{} {}", observation.time, observation.value);
//!         }
//!     }
//! }
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - XML events, tree and stream cursors
//! - [`structure`] - Structure documents, code hierarchies, validation
//! - [`data`] - Data message formats, readers and the metadata cache

pub mod prelude;

/// XML reading primitives and cursors.
pub mod core {
    pub use sdmx_core::*;
}

/// Structure (key family) documents.
pub mod structure {
    pub use sdmx_structure::*;
}

/// Data message decoding.
pub mod data {
    pub use sdmx_data::*;
}

// Re-export commonly used items at the crate root
pub use sdmx_data::{DecodeError, Decoder, DecoderBuilder, Format, MetadataSource, StaticSource};
pub use sdmx_structure::{MetadataDocument, parse_structure};
