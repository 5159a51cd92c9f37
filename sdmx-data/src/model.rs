//! Decoded values.
//!
//! [`SeriesKey`] and [`Observation`] are produced by both the streaming
//! readers and the eager decoder. [`Message`], [`Dataset`] and [`Series`]
//! hold a fully materialized message.

use crate::error::Result;
use crate::key_family::KeyFamilyView;
use sdmx_structure::DescribedKey;

/// Raw series key: `(concept, value)` pairs in source order, group pairs
/// first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesKey {
    pairs: Vec<(String, String)>,
}

impl SeriesKey {
    /// Creates an empty key.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a pair.
    pub fn push(&mut self, concept: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((concept.into(), value.into()));
    }

    /// Returns the value for `concept`.
    ///
    /// `None` if the concept is absent or has more than one value; such a
    /// key fails description.
    #[must_use]
    pub fn get(&self, concept: &str) -> Option<&str> {
        let mut values = self
            .pairs
            .iter()
            .filter(|(c, _)| c == concept)
            .map(|(_, value)| value.as_str());
        match (values.next(), values.next()) {
            (Some(value), None) => Some(value),
            _ => None,
        }
    }

    /// All pairs in order.
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Iterates over `(concept, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(concept, value)| (concept.as_str(), value.as_str()))
    }

    /// Number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if the key has no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl Extend<(String, String)> for SeriesKey {
    fn extend<T: IntoIterator<Item = (String, String)>>(&mut self, iter: T) {
        self.pairs.extend(iter);
    }
}

impl FromIterator<(String, String)> for SeriesKey {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

/// One observation. Both fields are kept exactly as written (or as the
/// time code's label); numeric interpretation is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    /// Observation period.
    pub time: String,
    /// Observation value.
    pub value: String,
}

impl Observation {
    /// Creates an observation.
    #[must_use]
    pub fn new(time: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            value: value.into(),
        }
    }
}

/// Materialized data message.
#[derive(Debug, Clone)]
pub struct Message {
    /// Datasets in document order.
    pub datasets: Vec<Dataset>,
}

/// Materialized dataset.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Key family the dataset conforms to.
    pub key_family: KeyFamilyView,
    /// Series in document order.
    pub series: Vec<Series>,
}

/// Materialized series.
#[derive(Debug, Clone)]
pub struct Series {
    /// Key family of the enclosing dataset.
    pub key_family: KeyFamilyView,
    /// Raw series key.
    pub key: SeriesKey,
    /// Observations in document order.
    pub observations: Vec<Observation>,
}

impl Series {
    /// Describes the series key in `lang`.
    ///
    /// # Errors
    /// Returns an error if a dimension has no value or cannot be resolved.
    pub fn describe_key(&self, lang: &str) -> Result<DescribedKey> {
        self.key_family.describe_key(&self.key, lang)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_key_repeated_concept_has_no_value() {
        let mut key = SeriesKey::new();
        key.push("INDIC", "TO-VP");
        key.push("COUNTRY", "OECD-E");
        key.push("INDIC", "TO-VP1P");

        assert_eq!(key.len(), 3);
        assert!(key.get("INDIC").is_none());
        assert_eq!(key.get("COUNTRY"), Some("OECD-E"));
        assert!(key.get("TIME").is_none());
        let concepts: Vec<_> = key.iter().map(|(concept, _)| concept).collect();
        assert_eq!(concepts, vec!["INDIC", "COUNTRY", "INDIC"]);
    }

    #[test]
    fn test_series_key_collect() {
        let key: SeriesKey = vec![("A".to_string(), "1".to_string())]
            .into_iter()
            .collect();
        assert_eq!(key.pairs(), &[("A".to_string(), "1".to_string())]);
        assert!(!key.is_empty());
    }
}
