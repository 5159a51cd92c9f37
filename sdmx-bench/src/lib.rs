//! # SDMX Bench
//!
//! Synthetic SDMX-ML documents for benchmarking the structure and data
//! decoders.

pub mod documents;

pub use documents::{DocumentShape, compact_message, generic_message, structure_document};
