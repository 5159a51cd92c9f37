//! Series key description.

use crate::error::StructureError;
use crate::hierarchy::describe_code;
use crate::types::{Dimension, KeyFamily, MetadataDocument};
use indexmap::IndexMap;

/// Dimension names mapped to label chains, in key family dimension order.
pub type DescribedKey = IndexMap<String, Vec<String>>;

/// Describes one dimension value.
///
/// Returns the dimension's concept name in `lang` with the value's label
/// chain. Values of uncoded dimensions are returned as their raw text.
///
/// # Errors
/// Returns `StructureError` if the concept, its name, the code list or one
/// of the codes cannot be resolved.
pub fn describe_value(
    metadata: &MetadataDocument,
    dimension: &Dimension,
    value: &str,
    lang: &str,
) -> Result<(String, Vec<String>), StructureError> {
    let name = concept_name(metadata, &dimension.concept_ref, lang)?;
    let labels = match &dimension.code_list_id {
        Some(id) => describe_code(metadata.require_code_list(id)?, value, lang)?,
        None => vec![value.to_string()],
    };
    Ok((name, labels))
}

/// Describes a series key against its key family.
///
/// Every ordinary dimension of `key_family` must have exactly one value in
/// `key`, counting group and series pairs together. Pairs for concepts that
/// are not dimensions are ignored.
///
/// # Errors
/// Returns `StructureError::MissingKeyValue` if a dimension has no value,
/// `StructureError::DuplicateKeyValue` if it has several, or any error of
/// [`describe_value`].
pub fn describe_key<K, V>(
    metadata: &MetadataDocument,
    key_family: &KeyFamily,
    key: &[(K, V)],
    lang: &str,
) -> Result<DescribedKey, StructureError>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut described = DescribedKey::with_capacity(key_family.dimensions().len());
    for dimension in key_family.dimensions() {
        let mut values = key
            .iter()
            .filter(|(concept, _)| concept.as_ref() == dimension.concept_ref)
            .map(|(_, value)| value.as_ref());
        let value = match (values.next(), values.next()) {
            (Some(value), None) => value,
            (None, _) => {
                return Err(StructureError::MissingKeyValue {
                    key_family: key_family.id.clone(),
                    concept: dimension.concept_ref.clone(),
                });
            }
            (Some(_), Some(_)) => {
                return Err(StructureError::DuplicateKeyValue {
                    key_family: key_family.id.clone(),
                    concept: dimension.concept_ref.clone(),
                });
            }
        };
        let (name, labels) = describe_value(metadata, dimension, value, lang)?;
        described.insert(name, labels);
    }
    Ok(described)
}

/// Names of the key family's dimensions in `lang`, in dimension order.
///
/// # Errors
/// Returns `StructureError` if a dimension's concept or its name cannot be
/// resolved.
pub fn describe_dimensions(
    metadata: &MetadataDocument,
    key_family: &KeyFamily,
    lang: &str,
) -> Result<Vec<String>, StructureError> {
    key_family
        .dimensions()
        .iter()
        .map(|dimension| concept_name(metadata, &dimension.concept_ref, lang))
        .collect()
}

fn concept_name(
    metadata: &MetadataDocument,
    concept_ref: &str,
    lang: &str,
) -> Result<String, StructureError> {
    metadata
        .require_concept(concept_ref)?
        .name(lang)
        .map(str::to_string)
        .ok_or_else(|| StructureError::missing_label("concept", concept_ref, lang))
}
