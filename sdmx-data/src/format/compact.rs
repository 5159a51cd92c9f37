//! Compact data messages.
//!
//! Compact messages use a namespace specific to each dataset, so elements
//! are matched by local name only. The series key is the set of attributes
//! on the `Series` element, and each `Obs` carries its period and value as
//! the `TIME` and `OBS_VALUE` attributes.

use super::{DataFormat, SeriesScan};
use crate::error::{DecodeError, Result};
use crate::model::{Observation, SeriesKey};
use sdmx_core::{Cursor, NamePattern};
use sdmx_structure::MetadataDocument;

const DATASET: NamePattern = NamePattern::local("DataSet");
const SERIES: NamePattern = NamePattern::local("Series");
const OBS: NamePattern = NamePattern::local("Obs");

// Fixed attribute names; they are not derived from the key family's time
// dimension and primary measure.
const TIME_ATTR: &str = "TIME";
const OBS_VALUE_ATTR: &str = "OBS_VALUE";

/// Compact data message layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompactFormat;

impl DataFormat for CompactFormat {
    fn name(&self) -> &'static str {
        "compact"
    }

    fn dataset_pattern(&self) -> NamePattern {
        DATASET
    }

    /// Compact datasets carry no reference; the metadata document must
    /// define exactly one key family.
    fn key_family_id<C: Cursor>(
        &self,
        _cursor: &mut C,
        metadata: &MetadataDocument,
    ) -> Result<String> {
        match metadata.key_families() {
            [key_family] => Ok(key_family.id.clone()),
            others => Err(DecodeError::AmbiguousKeyFamily {
                count: others.len(),
            }),
        }
    }

    fn next_series<C: Cursor>(
        &self,
        cursor: &mut C,
        _scan: &mut SeriesScan,
    ) -> Result<Option<SeriesKey>> {
        let Some(element) = cursor.next_child_matching(&SERIES)? else {
            return Ok(None);
        };
        Ok(Some(element.attributes.into_iter().collect()))
    }

    fn next_observation<C: Cursor>(&self, cursor: &mut C) -> Result<Option<Observation>> {
        let Some(element) = cursor.next_child_matching(&OBS)? else {
            return Ok(None);
        };
        let time = element
            .attribute(TIME_ATTR)
            .ok_or_else(|| DecodeError::missing_attr(element.name.to_string(), TIME_ATTR))?;
        let value = element
            .attribute(OBS_VALUE_ATTR)
            .ok_or_else(|| DecodeError::missing_attr(element.name.to_string(), OBS_VALUE_ATTR))?;
        let observation = Observation::new(time, value);
        cursor.leave()?;
        Ok(Some(observation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{COMPACT, DSD, TWO_KEY_FAMILIES_DSD};
    use sdmx_core::{StreamCursor, XmlReader};
    use sdmx_structure::parse_structure;

    #[test]
    fn test_series_attributes_form_the_key() {
        let mut cursor = StreamCursor::new(XmlReader::from_bytes(COMPACT.as_bytes()));
        cursor.next_child().unwrap();
        cursor.next_child_matching(&DATASET).unwrap().unwrap();
        let mut scan = SeriesScan::default();

        let key = CompactFormat
            .next_series(&mut cursor, &mut scan)
            .unwrap()
            .unwrap();
        let pairs: Vec<_> = key.iter().collect();
        assert_eq!(
            pairs,
            vec![("COUNTRY", "OECD-E"), ("INDIC", "TO-VP"), ("TIME_FORMAT", "P1Y")]
        );

        let first = CompactFormat.next_observation(&mut cursor).unwrap().unwrap();
        let second = CompactFormat.next_observation(&mut cursor).unwrap().unwrap();
        assert_eq!(first, Observation::new("1986", "538954.220075479"));
        assert_eq!(second, Observation::new("1987", "598184.668422966"));
        assert!(CompactFormat.next_observation(&mut cursor).unwrap().is_none());

        let key = CompactFormat
            .next_series(&mut cursor, &mut scan)
            .unwrap()
            .unwrap();
        assert_eq!(key.get("INDIC"), Some("TO-VP1P"));
    }

    #[test]
    fn test_sole_key_family_is_used() {
        let metadata = parse_structure(DSD).unwrap();
        let mut cursor = StreamCursor::new(XmlReader::from_bytes(b"<a/>".as_slice()));

        let id = CompactFormat.key_family_id(&mut cursor, &metadata).unwrap();
        assert_eq!(id, "MON2012TSE_O");
    }

    #[test]
    fn test_several_key_families_are_ambiguous() {
        let metadata = parse_structure(TWO_KEY_FAMILIES_DSD).unwrap();
        let mut cursor = StreamCursor::new(XmlReader::from_bytes(b"<a/>".as_slice()));

        let err = CompactFormat
            .key_family_id(&mut cursor, &metadata)
            .unwrap_err();
        assert!(matches!(err, DecodeError::AmbiguousKeyFamily { count: 2 }));
    }

    #[test]
    fn test_obs_without_time() {
        let xml = r#"<Series><Obs OBS_VALUE="1"/></Series>"#;
        let mut cursor = StreamCursor::new(XmlReader::from_bytes(xml.as_bytes()));
        cursor.next_child().unwrap();

        let err = CompactFormat.next_observation(&mut cursor).unwrap_err();
        assert!(matches!(err, DecodeError::MissingAttribute { attribute: "TIME", .. }));
    }
}
