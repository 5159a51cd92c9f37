//! # SDMX Data
//!
//! Decoding of SDMX-ML 2.0 data messages against their key families.
//!
//! This crate provides:
//! - Generic and compact message layouts behind one [`DataFormat`] trait
//! - Pull readers over datasets, series and observations that work on both
//!   a parsed [`sdmx_core::Document`] and a single forward stream
//! - Series key and coded time resolution to human-readable labels
//! - A per-session, thread-safe cache of metadata documents fetched by URI

pub mod builder;
pub mod decoder;
pub mod error;
pub mod fetch;
pub mod format;
pub mod key_family;
pub mod model;
pub mod reader;

#[cfg(test)]
mod fixtures;

pub use builder::DecoderBuilder;
pub use decoder::Decoder;
pub use error::{DecodeError, Result, SourceError};
pub use fetch::{FetchCache, MetadataSource, NotFound, StaticSource};
pub use format::{CompactFormat, DataFormat, Format, GenericFormat, SeriesScan};
pub use key_family::KeyFamilyView;
pub use model::{Dataset, Message, Observation, Series, SeriesKey};
pub use reader::{DatasetReader, MessageReader, Observations, SeriesReader};
