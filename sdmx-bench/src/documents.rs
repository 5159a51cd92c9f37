//! Synthetic document generators.
//!
//! Every generated data message conforms to the key family of
//! [`structure_document`] built from the same [`DocumentShape`], and carries
//! no `keyFamilyURI`, so it decodes against default metadata.

/// Identifier of the generated key family.
pub const KEY_FAMILY_ID: &str = "BENCH";

/// Size parameters of a generated document pair.
#[derive(Debug, Clone, Copy)]
pub struct DocumentShape {
    /// Codes in the country code list.
    pub countries: usize,
    /// Codes in the indicator code list.
    pub indicators: usize,
    /// Length of each parent chain in the indicator code list.
    pub hierarchy_depth: usize,
    /// Observations per series.
    pub observations: usize,
}

impl DocumentShape {
    /// Number of series in a generated message.
    #[must_use]
    pub fn series(&self) -> usize {
        self.countries * self.indicators
    }
}

impl Default for DocumentShape {
    fn default() -> Self {
        Self {
            countries: 10,
            indicators: 20,
            hierarchy_depth: 4,
            observations: 50,
        }
    }
}

fn indicator_parent(shape: &DocumentShape, index: usize) -> Option<usize> {
    (shape.hierarchy_depth > 1 && index % shape.hierarchy_depth != 0).then(|| index - 1)
}

/// Builds a structure document with two coded dimensions and uncoded time.
#[must_use]
pub fn structure_document(shape: &DocumentShape) -> String {
    let mut xml = String::from(
        r#"<Structure xmlns="http://www.SDMX.org/resources/SDMXML/schemas/v2_0/message" xmlns:structure="http://www.SDMX.org/resources/SDMXML/schemas/v2_0/structure">
<CodeLists>
<structure:CodeList id="CL_COUNTRY" agencyID="BENCH">
"#,
    );
    for country in 0..shape.countries {
        xml.push_str(&format!(
            "<structure:Code value=\"C{country}\"><structure:Description xml:lang=\"en\">Country {country}</structure:Description></structure:Code>\n"
        ));
    }
    xml.push_str("</structure:CodeList>\n<structure:CodeList id=\"CL_INDIC\" agencyID=\"BENCH\">\n");
    for indicator in 0..shape.indicators {
        let parent = indicator_parent(shape, indicator)
            .map(|parent| format!(" parentCode=\"I{parent}\""))
            .unwrap_or_default();
        xml.push_str(&format!(
            "<structure:Code value=\"I{indicator}\"{parent}><structure:Description xml:lang=\"en\">Indicator {indicator}</structure:Description></structure:Code>\n"
        ));
    }
    xml.push_str(&format!(
        r#"</structure:CodeList>
</CodeLists>
<Concepts>
<structure:Concept id="COUNTRY"><structure:Name xml:lang="en">Country</structure:Name></structure:Concept>
<structure:Concept id="INDIC"><structure:Name xml:lang="en">Indicator</structure:Name></structure:Concept>
</Concepts>
<KeyFamilies>
<structure:KeyFamily id="{KEY_FAMILY_ID}" agencyID="BENCH">
<structure:Name xml:lang="en">Benchmark key family</structure:Name>
<structure:Components>
<structure:Dimension conceptRef="COUNTRY" codelist="CL_COUNTRY"/>
<structure:Dimension conceptRef="INDIC" codelist="CL_INDIC"/>
<structure:TimeDimension conceptRef="TIME"/>
<structure:PrimaryMeasure conceptRef="OBS_VALUE"/>
</structure:Components>
</structure:KeyFamily>
</KeyFamilies>
</Structure>"#
    ));
    xml
}

/// Builds a generic data message.
#[must_use]
pub fn generic_message(shape: &DocumentShape) -> String {
    let mut xml = format!(
        r#"<message:GenericData xmlns="http://www.SDMX.org/resources/SDMXML/schemas/v2_0/generic" xmlns:message="http://www.SDMX.org/resources/SDMXML/schemas/v2_0/message">
<DataSet>
<KeyFamilyRef>{KEY_FAMILY_ID}</KeyFamilyRef>
"#
    );
    for country in 0..shape.countries {
        for indicator in 0..shape.indicators {
            xml.push_str(&format!(
                "<Series><SeriesKey><Value concept=\"COUNTRY\" value=\"C{country}\"/><Value concept=\"INDIC\" value=\"I{indicator}\"/></SeriesKey>\n"
            ));
            for obs in 0..shape.observations {
                xml.push_str(&format!(
                    "<Obs><Time>{}</Time><ObsValue value=\"{}.5\"/></Obs>\n",
                    1900 + obs,
                    obs * 10
                ));
            }
            xml.push_str("</Series>\n");
        }
    }
    xml.push_str("</DataSet>\n</message:GenericData>");
    xml
}

/// Builds a compact data message with the same content as
/// [`generic_message`].
#[must_use]
pub fn compact_message(shape: &DocumentShape) -> String {
    let mut xml = String::from(
        r#"<CompactData xmlns="http://www.SDMX.org/resources/SDMXML/schemas/v2_0/message">
<DataSet xmlns="urn:bench:data">
"#,
    );
    for country in 0..shape.countries {
        for indicator in 0..shape.indicators {
            xml.push_str(&format!(
                "<Series COUNTRY=\"C{country}\" INDIC=\"I{indicator}\" TIME_FORMAT=\"P1Y\">\n"
            ));
            for obs in 0..shape.observations {
                xml.push_str(&format!(
                    "<Obs TIME=\"{}\" OBS_VALUE=\"{}.5\"/>\n",
                    1900 + obs,
                    obs * 10
                ));
            }
            xml.push_str("</Series>\n");
        }
    }
    xml.push_str("</DataSet>\n</CompactData>");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdmx_data::{Decoder, Format};
    use sdmx_structure::{describe_code, parse_structure, validate_structure};

    fn small() -> DocumentShape {
        DocumentShape {
            countries: 2,
            indicators: 5,
            hierarchy_depth: 3,
            observations: 4,
        }
    }

    #[test]
    fn test_structure_document_is_valid() {
        let shape = small();
        let metadata = parse_structure(&structure_document(&shape)).unwrap();
        validate_structure(&metadata).unwrap();

        let indicators = metadata.code_list("CL_INDIC").unwrap();
        assert_eq!(indicators.len(), 5);
        assert_eq!(
            describe_code(indicators, "I2", "en").unwrap(),
            vec!["Indicator 0", "Indicator 1", "Indicator 2"]
        );
        assert_eq!(describe_code(indicators, "I3", "en").unwrap(), vec!["Indicator 3"]);
    }

    #[test]
    fn test_messages_decode_to_the_same_content() {
        let shape = small();
        let dsd = structure_document(&shape);

        let generic = Decoder::builder()
            .default_metadata_bytes(dsd.clone())
            .build()
            .unwrap()
            .read_str(&generic_message(&shape), None)
            .unwrap();
        let compact = Decoder::builder()
            .format(Format::Compact)
            .default_metadata_bytes(dsd)
            .build()
            .unwrap()
            .read_str(&compact_message(&shape), None)
            .unwrap();

        let generic = &generic.datasets[0].series;
        let compact = &compact.datasets[0].series;
        assert_eq!(generic.len(), shape.series());
        assert_eq!(compact.len(), shape.series());
        for (a, b) in generic.iter().zip(compact) {
            assert_eq!(a.observations, b.observations);
            assert_eq!(a.describe_key("en").unwrap(), b.describe_key("en").unwrap());
        }
        assert_eq!(generic[0].observations.len(), 4);
    }
}
