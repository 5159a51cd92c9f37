//! Pull-based message reading.
//!
//! A [`MessageReader`] hands out one [`DatasetReader`] at a time, which
//! hands out one [`SeriesReader`] at a time. Each reader borrows its parent
//! mutably, so a dataset cannot be advanced while one of its series is
//! still in use; this is the single-pass contract of the stream backend,
//! enforced at compile time. Dropping a reader early is allowed: the parent
//! skips the rest of the element on its next call.

use crate::decoder::Decoder;
use crate::error::{DecodeError, Result};
use crate::format::{DataFormat, SeriesScan};
use crate::key_family::KeyFamilyView;
use crate::model::{Dataset, Message, Observation, Series, SeriesKey};
use sdmx_core::Cursor;
use sdmx_structure::DescribedKey;

const ROOT_DEPTH: usize = 1;

/// Reader over the datasets of one data message.
pub struct MessageReader<'d, C, F> {
    cursor: C,
    format: F,
    decoder: &'d Decoder,
    started: bool,
    finished: bool,
    datasets: usize,
}

impl<'d, C: Cursor, F: DataFormat> MessageReader<'d, C, F> {
    /// Creates a reader positioned before the message root.
    #[must_use]
    pub fn new(cursor: C, format: F, decoder: &'d Decoder) -> Self {
        Self {
            cursor,
            format,
            decoder,
            started: false,
            finished: false,
            datasets: 0,
        }
    }

    /// Advances to the next dataset and resolves its key family.
    ///
    /// # Errors
    /// Returns an error if the message is malformed, the metadata cannot be
    /// obtained, or the key family cannot be resolved.
    pub fn next_dataset(&mut self) -> Result<Option<DatasetReader<'_, C, F>>> {
        if self.finished {
            return Ok(None);
        }
        if self.started {
            self.cursor.unwind_to(ROOT_DEPTH)?;
        } else {
            self.started = true;
            if self.cursor.next_child()?.is_none() {
                self.finished = true;
                return Ok(None);
            }
        }

        let pattern = self.format.dataset_pattern();
        let Some(element) = self.cursor.next_child_matching(&pattern)? else {
            self.finished = true;
            return Ok(None);
        };

        let index = self.datasets;
        self.datasets += 1;
        let metadata = self
            .decoder
            .metadata_for(element.attribute("keyFamilyURI"), index)?;
        let id = self.format.key_family_id(&mut self.cursor, &metadata)?;
        let key_family = KeyFamilyView::new(metadata, &id)?;
        tracing::debug!(
            dataset = index,
            format = self.format.name(),
            key_family = %id,
            "resolved dataset key family"
        );

        Ok(Some(DatasetReader {
            cursor: &mut self.cursor,
            format: &self.format,
            key_family,
            depth: ROOT_DEPTH + 1,
            scan: SeriesScan::default(),
            open_series: None,
            finished: false,
            warned: false,
        }))
    }

    /// Reads the remaining message into owned values.
    ///
    /// `lang` is needed only if a dataset's time dimension is coded.
    ///
    /// # Errors
    /// Returns the first error encountered.
    pub fn read_all(&mut self, lang: Option<&str>) -> Result<Message> {
        let mut datasets = Vec::new();
        while let Some(mut dataset) = self.next_dataset()? {
            datasets.push(dataset.read_all(lang)?);
        }
        Ok(Message { datasets })
    }
}

/// Reader over the series of one dataset.
pub struct DatasetReader<'m, C, F> {
    cursor: &'m mut C,
    format: &'m F,
    key_family: KeyFamilyView,
    depth: usize,
    scan: SeriesScan,
    open_series: Option<usize>,
    finished: bool,
    warned: bool,
}

impl<C: Cursor, F: DataFormat> DatasetReader<'_, C, F> {
    /// Key family of the dataset.
    #[must_use]
    pub fn key_family(&self) -> &KeyFamilyView {
        &self.key_family
    }

    /// Advances to the next series.
    ///
    /// # Errors
    /// Returns an error if the message is malformed or a key cannot be read.
    pub fn next_series(&mut self) -> Result<Option<SeriesReader<'_, C, F>>> {
        if self.finished {
            return Ok(None);
        }
        if let Some(parent) = self.open_series.take() {
            self.cursor.unwind_to(parent)?;
        }

        let Some(key) = self.format.next_series(&mut *self.cursor, &mut self.scan)? else {
            self.finished = true;
            debug_assert!(self.cursor.depth() < self.depth);
            return Ok(None);
        };
        if !self.warned {
            self.warn_unknown_concepts(&key);
        }

        let depth = self.cursor.depth();
        self.open_series = Some(depth - 1);
        Ok(Some(SeriesReader {
            cursor: &mut *self.cursor,
            format: self.format,
            key_family: &self.key_family,
            key,
            depth,
            finished: false,
        }))
    }

    /// Reads the remaining series into an owned dataset.
    ///
    /// # Errors
    /// Returns the first error encountered.
    pub fn read_all(&mut self, lang: Option<&str>) -> Result<Dataset> {
        let mut series = Vec::new();
        while let Some(mut reader) = self.next_series()? {
            let observations = reader.collect_observations(lang)?;
            series.push(Series {
                key_family: reader.key_family.clone(),
                key: reader.key,
                observations,
            });
        }
        Ok(Dataset {
            key_family: self.key_family.clone(),
            series,
        })
    }

    fn warn_unknown_concepts(&mut self, key: &SeriesKey) {
        let unknown: Vec<&str> = key
            .iter()
            .map(|(concept, _)| concept)
            .filter(|concept| !self.key_family.is_dimension(concept))
            .collect();
        if !unknown.is_empty() {
            tracing::warn!(
                key_family = self.key_family.id(),
                concepts = ?unknown,
                "series key carries concepts that are not dimensions"
            );
            self.warned = true;
        }
    }
}

/// Reader over the observations of one series.
pub struct SeriesReader<'s, C, F> {
    cursor: &'s mut C,
    format: &'s F,
    key_family: &'s KeyFamilyView,
    key: SeriesKey,
    depth: usize,
    finished: bool,
}

impl<'s, C: Cursor, F: DataFormat> SeriesReader<'s, C, F> {
    /// Raw series key, group pairs first.
    #[must_use]
    pub fn key(&self) -> &SeriesKey {
        &self.key
    }

    /// Key family of the enclosing dataset.
    #[must_use]
    pub fn key_family(&self) -> &KeyFamilyView {
        self.key_family
    }

    /// Describes the series key in `lang`, in key family dimension order.
    ///
    /// # Errors
    /// Returns an error if a dimension has no value or a value cannot be
    /// resolved.
    pub fn describe_key(&self, lang: &str) -> Result<DescribedKey> {
        self.key_family.describe_key(&self.key, lang)
    }

    /// Reads the next observation.
    ///
    /// If the time dimension is coded, the time is replaced by its label in
    /// `lang`, which must then be given.
    ///
    /// # Errors
    /// Returns `DecodeError::MissingLanguage` before reading anything if
    /// `lang` is needed but absent, or any read or resolution error.
    pub fn next_observation(&mut self, lang: Option<&str>) -> Result<Option<Observation>> {
        let time_codes = self.key_family.time_code_list()?;
        if let (Some(code_list), None) = (time_codes, lang) {
            return Err(DecodeError::MissingLanguage {
                code_list: code_list.id.clone(),
            });
        }
        if self.finished {
            return Ok(None);
        }

        self.cursor.unwind_to(self.depth)?;
        let Some(mut observation) = self.format.next_observation(&mut *self.cursor)? else {
            self.finished = true;
            return Ok(None);
        };
        if let (Some(code_list), Some(lang)) = (time_codes, lang) {
            observation.time = self
                .key_family
                .describe_time(code_list, &observation.time, lang)?;
        }
        Ok(Some(observation))
    }

    /// Iterates over the remaining observations.
    ///
    /// # Errors
    /// Returns `DecodeError::MissingLanguage` if the time dimension is coded
    /// and `lang` is `None`; nothing is read in that case.
    pub fn observations<'a>(
        &'a mut self,
        lang: Option<&'a str>,
    ) -> Result<Observations<'a, 's, C, F>> {
        if let Some(code_list) = self.key_family.time_code_list()?
            && lang.is_none()
        {
            return Err(DecodeError::MissingLanguage {
                code_list: code_list.id.clone(),
            });
        }
        Ok(Observations {
            series: self,
            lang,
            done: false,
        })
    }

    /// Collects the remaining observations.
    ///
    /// # Errors
    /// Returns the first error encountered.
    pub fn collect_observations(&mut self, lang: Option<&str>) -> Result<Vec<Observation>> {
        self.observations(lang)?.collect()
    }
}

/// Iterator over the observations of a series.
///
/// Stops after the first error.
pub struct Observations<'a, 's, C, F> {
    series: &'a mut SeriesReader<'s, C, F>,
    lang: Option<&'a str>,
    done: bool,
}

impl<C: Cursor, F: DataFormat> Iterator for Observations<'_, '_, C, F> {
    type Item = Result<Observation>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.series.next_observation(self.lang).transpose();
        if !matches!(item, Some(Ok(_))) {
            self.done = true;
        }
        item
    }
}
