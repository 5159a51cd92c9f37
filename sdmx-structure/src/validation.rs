//! Metadata document validation.
//!
//! Parsing is lenient: duplicate identifiers resolve to their first
//! definition and references are only followed when a series is described.
//! This module checks a parsed document up front so that broken references
//! surface before any data is decoded.

use crate::error::StructureError;
use crate::hierarchy::ancestry;
use crate::types::{CodeList, DimensionRole, KeyFamily, MetadataDocument};
use std::collections::HashSet;

/// Validates a parsed metadata document for consistency.
///
/// # Arguments
/// * `metadata` - The document to validate
///
/// # Returns
/// Ok(()) if valid, or the first problem found.
///
/// # Errors
/// Returns `StructureError::Validation` for duplicate identifiers, or the
/// resolution error for a dangling reference or cyclic code hierarchy.
pub fn validate_structure(metadata: &MetadataDocument) -> Result<(), StructureError> {
    check_unique("concept", metadata.concepts().iter().map(|c| c.id.as_str()))?;
    check_unique("code list", metadata.code_lists().iter().map(|c| c.id.as_str()))?;
    check_unique(
        "key family",
        metadata.key_families().iter().map(|k| k.id.as_str()),
    )?;

    for code_list in metadata.code_lists() {
        validate_code_list(code_list)?;
    }
    for key_family in metadata.key_families() {
        validate_key_family(metadata, key_family)?;
    }
    Ok(())
}

/// Validates code values and parent chains of a code list.
fn validate_code_list(code_list: &CodeList) -> Result<(), StructureError> {
    check_unique(
        &format!("code in code list '{}'", code_list.id),
        code_list.codes().iter().map(|c| c.value.as_str()),
    )?;

    for code in code_list.codes() {
        ancestry(code_list, &code.value)?;
    }
    Ok(())
}

/// Validates the component references of a key family.
fn validate_key_family(
    metadata: &MetadataDocument,
    key_family: &KeyFamily,
) -> Result<(), StructureError> {
    let mut seen = HashSet::new();
    for dimension in key_family.dimensions() {
        if !seen.insert(dimension.concept_ref.as_str()) {
            return Err(StructureError::Validation {
                message: format!(
                    "Duplicate dimension '{}' in key family '{}'",
                    dimension.concept_ref, key_family.id
                ),
            });
        }
    }

    for component in key_family.components() {
        // Time and measure concepts are conventionally left out of the
        // concept list; only key dimensions are described by name.
        if component.role == DimensionRole::Dimension {
            metadata.require_concept(&component.concept_ref)?;
        }
        if let Some(id) = &component.code_list_id {
            metadata.require_code_list(id)?;
        }
    }
    Ok(())
}

fn check_unique<'a>(
    kind: &str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), StructureError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(StructureError::Validation {
                message: format!("Duplicate {} '{}'", kind, id),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_structure;

    fn structure(body: &str) -> String {
        format!(
            r#"<Structure xmlns="http://www.SDMX.org/resources/SDMXML/schemas/v2_0/message" xmlns:structure="http://www.SDMX.org/resources/SDMXML/schemas/v2_0/structure">{}</Structure>"#,
            body
        )
    }

    #[test]
    fn test_validate_consistent_document() {
        let xml = structure(
            r#"<CodeLists><structure:CodeList id="CL_C">
<structure:Code value="A"/><structure:Code value="B" parentCode="A"/>
</structure:CodeList></CodeLists>
<Concepts><structure:Concept id="C"/></Concepts>
<KeyFamilies><structure:KeyFamily id="KF"><structure:Components>
<structure:Dimension conceptRef="C" codelist="CL_C"/>
<structure:TimeDimension conceptRef="TIME"/>
<structure:PrimaryMeasure conceptRef="OBS_VALUE"/>
</structure:Components></structure:KeyFamily></KeyFamilies>"#,
        );
        let metadata = parse_structure(&xml).unwrap();
        assert!(validate_structure(&metadata).is_ok());
    }

    #[test]
    fn test_duplicate_code_list() {
        let xml = structure(
            r#"<CodeLists><structure:CodeList id="CL"/><structure:CodeList id="CL"/></CodeLists>"#,
        );
        let metadata = parse_structure(&xml).unwrap();

        let err = validate_structure(&metadata).unwrap_err();
        assert!(matches!(err, StructureError::Validation { .. }));
    }

    #[test]
    fn test_duplicate_code_value() {
        let xml = structure(
            r#"<CodeLists><structure:CodeList id="CL"><structure:Code value="A"/><structure:Code value="A"/></structure:CodeList></CodeLists>"#,
        );
        let metadata = parse_structure(&xml).unwrap();

        assert!(matches!(
            validate_structure(&metadata),
            Err(StructureError::Validation { .. })
        ));
    }

    #[test]
    fn test_dangling_parent_code() {
        let xml = structure(
            r#"<CodeLists><structure:CodeList id="CL"><structure:Code value="40000" parentCode="41000"/></structure:CodeList></CodeLists>"#,
        );
        let metadata = parse_structure(&xml).unwrap();

        assert!(matches!(
            validate_structure(&metadata),
            Err(StructureError::UnknownCode { .. })
        ));
    }

    #[test]
    fn test_cyclic_code_list() {
        let xml = structure(
            r#"<CodeLists><structure:CodeList id="CL">
<structure:Code value="A" parentCode="B"/><structure:Code value="B" parentCode="A"/>
</structure:CodeList></CodeLists>"#,
        );
        let metadata = parse_structure(&xml).unwrap();

        assert!(matches!(
            validate_structure(&metadata),
            Err(StructureError::CyclicHierarchy { .. })
        ));
    }

    #[test]
    fn test_dangling_code_list_reference() {
        let xml = structure(
            r#"<Concepts><structure:Concept id="COUNTRY"/></Concepts>
<KeyFamilies><structure:KeyFamily id="KF"><structure:Components>
<structure:Dimension conceptRef="COUNTRY" codelist="CL_MISSING"/>
</structure:Components></structure:KeyFamily></KeyFamilies>"#,
        );
        let metadata = parse_structure(&xml).unwrap();

        assert!(matches!(
            validate_structure(&metadata),
            Err(StructureError::UnknownCodeList { ref id }) if id == "CL_MISSING"
        ));
    }

    #[test]
    fn test_unknown_dimension_concept() {
        let xml = structure(
            r#"<KeyFamilies><structure:KeyFamily id="KF"><structure:Components>
<structure:Dimension conceptRef="COUNTRY"/>
</structure:Components></structure:KeyFamily></KeyFamilies>"#,
        );
        let metadata = parse_structure(&xml).unwrap();

        assert!(matches!(
            validate_structure(&metadata),
            Err(StructureError::UnknownConcept { .. })
        ));
    }
}
