//! Generic data messages.
//!
//! ```text
//! DataSet keyFamilyURI=..
//!   KeyFamilyRef            key family id as text
//!   Group                   optional, shares a partial key
//!     GroupKey / Value*
//!     Series*
//!   Series
//!     SeriesKey / Value*    concept="" value=""
//!     Obs*
//!       Time                text
//!       ObsValue            value=""
//! ```

use super::{DataFormat, GroupScope, SeriesScan};
use crate::error::{DecodeError, Result};
use crate::model::{Observation, SeriesKey};
use sdmx_core::{Cursor, NamePattern, ns};
use sdmx_structure::MetadataDocument;

const DATASET: NamePattern = NamePattern::qualified(&[ns::GENERIC, ns::MESSAGE], "DataSet");
const KEY_FAMILY_REF: NamePattern = NamePattern::qualified(&[ns::GENERIC], "KeyFamilyRef");
const GROUP: NamePattern = NamePattern::qualified(&[ns::GENERIC], "Group");
const GROUP_KEY: NamePattern = NamePattern::qualified(&[ns::GENERIC], "GroupKey");
const SERIES: NamePattern = NamePattern::qualified(&[ns::GENERIC], "Series");
const SERIES_KEY: NamePattern = NamePattern::qualified(&[ns::GENERIC], "SeriesKey");
const VALUE: NamePattern = NamePattern::qualified(&[ns::GENERIC], "Value");
const OBS: NamePattern = NamePattern::qualified(&[ns::GENERIC], "Obs");
const TIME: NamePattern = NamePattern::qualified(&[ns::GENERIC], "Time");
const OBS_VALUE: NamePattern = NamePattern::qualified(&[ns::GENERIC], "ObsValue");

/// Generic data message layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericFormat;

impl DataFormat for GenericFormat {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn dataset_pattern(&self) -> NamePattern {
        DATASET
    }

    fn key_family_id<C: Cursor>(
        &self,
        cursor: &mut C,
        _metadata: &MetadataDocument,
    ) -> Result<String> {
        cursor.seek_child(&KEY_FAMILY_REF)?;
        Ok(cursor.inner_text()?.trim().to_string())
    }

    fn next_series<C: Cursor>(
        &self,
        cursor: &mut C,
        scan: &mut SeriesScan,
    ) -> Result<Option<SeriesKey>> {
        loop {
            let depth = cursor.depth();
            let Some(element) = cursor.next_child()? else {
                // The element at `depth` has closed: either the group we
                // were in or the dataset itself.
                if scan.group.as_ref().is_some_and(|group| group.depth == depth) {
                    scan.group = None;
                    continue;
                }
                return Ok(None);
            };

            if SERIES.matches(&element.name) {
                let mut key = scan
                    .group
                    .as_ref()
                    .map(|group| group.key.clone())
                    .unwrap_or_default();
                cursor.seek_child(&SERIES_KEY)?;
                read_values(cursor, &mut key)?;
                return Ok(Some(key));
            }

            if GROUP.matches(&element.name) && scan.group.is_none() {
                cursor.seek_child(&GROUP_KEY)?;
                let mut key = SeriesKey::new();
                read_values(cursor, &mut key)?;
                scan.group = Some(GroupScope {
                    depth: cursor.depth(),
                    key,
                });
                continue;
            }

            tracing::trace!(element = %element.name, "skipping dataset child");
            cursor.leave()?;
        }
    }

    fn next_observation<C: Cursor>(&self, cursor: &mut C) -> Result<Option<Observation>> {
        if cursor.next_child_matching(&OBS)?.is_none() {
            return Ok(None);
        }

        let mut time = None;
        let mut value = None;
        while let Some(child) = cursor.next_child()? {
            if TIME.matches(&child.name) {
                time = Some(cursor.inner_text()?);
                continue;
            }
            if OBS_VALUE.matches(&child.name) {
                let raw = child
                    .attribute("value")
                    .ok_or_else(|| DecodeError::missing_attr(child.name.to_string(), "value"))?;
                value = Some(raw.to_string());
            }
            cursor.leave()?;
        }

        let time = time.ok_or(DecodeError::MissingElement {
            parent: "Obs",
            element: "Time",
        })?;
        let value = value.ok_or(DecodeError::MissingElement {
            parent: "Obs",
            element: "ObsValue",
        })?;
        Ok(Some(Observation { time, value }))
    }
}

/// Reads the `Value` children of a key element into `key` and closes it.
fn read_values<C: Cursor>(cursor: &mut C, key: &mut SeriesKey) -> Result<()> {
    while let Some(element) = cursor.next_child_matching(&VALUE)? {
        let concept = element
            .attribute("concept")
            .ok_or_else(|| DecodeError::missing_attr(element.name.to_string(), "concept"))?;
        let value = element
            .attribute("value")
            .ok_or_else(|| DecodeError::missing_attr(element.name.to_string(), "value"))?;
        key.push(concept, value);
        cursor.leave()?;
    }
    Ok(())
}
