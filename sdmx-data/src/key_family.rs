//! Key family resolved for a dataset.

use crate::error::{DecodeError, Result};
use crate::model::SeriesKey;
use sdmx_structure::{
    CodeList, DescribedKey, KeyFamily, MetadataDocument, StructureError, describe_code,
    describe_dimensions, describe_key,
};
use std::sync::Arc;

/// A key family together with the metadata document that defines it.
///
/// Cloning is cheap; the document is shared.
#[derive(Debug, Clone)]
pub struct KeyFamilyView {
    metadata: Arc<MetadataDocument>,
    index: usize,
}

impl KeyFamilyView {
    /// Resolves key family `id` in `metadata`.
    ///
    /// # Errors
    /// Returns `StructureError::UnknownKeyFamily` if the document does not
    /// define it.
    pub fn new(metadata: Arc<MetadataDocument>, id: &str) -> Result<Self> {
        let index = metadata
            .key_families()
            .iter()
            .position(|key_family| key_family.id == id)
            .ok_or_else(|| StructureError::UnknownKeyFamily { id: id.to_string() })?;
        Ok(Self { metadata, index })
    }

    /// Returns the key family definition.
    #[must_use]
    pub fn definition(&self) -> &KeyFamily {
        &self.metadata.key_families()[self.index]
    }

    /// Returns the metadata document the key family belongs to.
    #[must_use]
    pub fn metadata(&self) -> &Arc<MetadataDocument> {
        &self.metadata
    }

    /// Key family identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.definition().id
    }

    /// Key family name in `lang`.
    #[must_use]
    pub fn name(&self, lang: &str) -> Option<&str> {
        self.definition().name(lang)
    }

    /// Names of the ordinary dimensions in `lang`, in key order.
    ///
    /// # Errors
    /// Returns an error if a dimension concept or its name is missing.
    pub fn describe_dimensions(&self, lang: &str) -> Result<Vec<String>> {
        Ok(describe_dimensions(&self.metadata, self.definition(), lang)?)
    }

    /// Describes a series key in `lang`.
    ///
    /// # Errors
    /// Returns an error if a dimension has no value in `key` or a value
    /// cannot be resolved.
    pub fn describe_key(&self, key: &SeriesKey, lang: &str) -> Result<DescribedKey> {
        Ok(describe_key(
            &self.metadata,
            self.definition(),
            key.pairs(),
            lang,
        )?)
    }

    /// Returns true if `concept` is an ordinary dimension of the key family.
    #[must_use]
    pub fn is_dimension(&self, concept: &str) -> bool {
        self.definition().dimension(concept).is_some()
    }

    /// Code list of the time dimension, if it is coded.
    ///
    /// A key family without a time dimension has uncoded time.
    ///
    /// # Errors
    /// Returns `StructureError::UnknownCodeList` for a dangling reference.
    pub fn time_code_list(&self) -> Result<Option<&CodeList>> {
        let Ok(time) = self.definition().time_dimension() else {
            return Ok(None);
        };
        match &time.code_list_id {
            Some(id) => Ok(Some(self.metadata.require_code_list(id)?)),
            None => Ok(None),
        }
    }

    /// Resolves a coded time value to its single label.
    ///
    /// # Errors
    /// Returns `DecodeError::UnsupportedHierarchy` if the code has ancestors,
    /// or the resolution error.
    pub fn describe_time(&self, code_list: &CodeList, value: &str, lang: &str) -> Result<String> {
        let mut labels = describe_code(code_list, value, lang)?;
        match labels.pop() {
            Some(label) if labels.is_empty() => Ok(label),
            last => {
                labels.extend(last);
                Err(DecodeError::UnsupportedHierarchy {
                    value: value.trim().to_string(),
                    labels,
                })
            }
        }
    }
}
