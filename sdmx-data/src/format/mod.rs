//! Data message formats.
//!
//! SDMX-ML 2.0 carries the same logical content in two layouts. A
//! [`DataFormat`] knows where one layout puts dataset, series and
//! observation boundaries and how to read keys and observation fields from
//! them. Formats only ever move a [`Cursor`] forward, so each works over
//! both the tree and the stream backend.

mod compact;
mod generic;

pub use compact::CompactFormat;
pub use generic::GenericFormat;

use crate::error::Result;
use crate::model::{Observation, SeriesKey};
use sdmx_core::{Cursor, NamePattern};
use sdmx_structure::MetadataDocument;

/// Series traversal state carried between [`DataFormat::next_series`]
/// calls within one dataset.
#[derive(Debug, Clone, Default)]
pub struct SeriesScan {
    group: Option<GroupScope>,
}

impl SeriesScan {
    /// Key of the group currently being read, if any.
    #[must_use]
    pub fn group_key(&self) -> Option<&SeriesKey> {
        self.group.as_ref().map(|group| &group.key)
    }
}

#[derive(Debug, Clone)]
struct GroupScope {
    depth: usize,
    key: SeriesKey,
}

/// Layout of a data message.
///
/// Cursor positions at each call:
/// - [`DataFormat::key_family_id`]: just inside the dataset element
/// - [`DataFormat::next_series`]: inside the dataset (or a group the format
///   entered earlier), between series; on `Some` the cursor is left inside
///   the series element
/// - [`DataFormat::next_observation`]: inside a series, between
///   observations
pub trait DataFormat {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Pattern matching dataset elements below the message root.
    fn dataset_pattern(&self) -> NamePattern;

    /// Determines the key family of the dataset being entered.
    ///
    /// # Errors
    /// Returns an error if the reference cannot be read or the key family
    /// cannot be determined from `metadata`.
    fn key_family_id<C: Cursor>(
        &self,
        cursor: &mut C,
        metadata: &MetadataDocument,
    ) -> Result<String>;

    /// Enters the next series and returns its full key.
    ///
    /// Returns `None` once the dataset element has been closed.
    ///
    /// # Errors
    /// Returns an error if the key cannot be read.
    fn next_series<C: Cursor>(
        &self,
        cursor: &mut C,
        scan: &mut SeriesScan,
    ) -> Result<Option<SeriesKey>>;

    /// Reads the next raw observation of the current series.
    ///
    /// Returns `None` once the series element has been closed.
    ///
    /// # Errors
    /// Returns an error if a required field is missing.
    fn next_observation<C: Cursor>(&self, cursor: &mut C) -> Result<Option<Observation>>;
}

/// Format selected at run time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    /// Generic data message.
    #[default]
    Generic,
    /// Compact (dataset-specific) data message.
    Compact,
}

impl DataFormat for Format {
    fn name(&self) -> &'static str {
        match self {
            Self::Generic => GenericFormat.name(),
            Self::Compact => CompactFormat.name(),
        }
    }

    fn dataset_pattern(&self) -> NamePattern {
        match self {
            Self::Generic => GenericFormat.dataset_pattern(),
            Self::Compact => CompactFormat.dataset_pattern(),
        }
    }

    fn key_family_id<C: Cursor>(
        &self,
        cursor: &mut C,
        metadata: &MetadataDocument,
    ) -> Result<String> {
        match self {
            Self::Generic => GenericFormat.key_family_id(cursor, metadata),
            Self::Compact => CompactFormat.key_family_id(cursor, metadata),
        }
    }

    fn next_series<C: Cursor>(
        &self,
        cursor: &mut C,
        scan: &mut SeriesScan,
    ) -> Result<Option<SeriesKey>> {
        match self {
            Self::Generic => GenericFormat.next_series(cursor, scan),
            Self::Compact => CompactFormat.next_series(cursor, scan),
        }
    }

    fn next_observation<C: Cursor>(&self, cursor: &mut C) -> Result<Option<Observation>> {
        match self {
            Self::Generic => GenericFormat.next_observation(cursor),
            Self::Compact => CompactFormat.next_observation(cursor),
        }
    }
}
