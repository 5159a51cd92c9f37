//! SDMX-ML 2.0 structure document reader.
//!
//! This module reads a structure message (the document a `keyFamilyURI`
//! points at) into a [`MetadataDocument`]. The whole document is
//! materialized first; entities are then picked out by path:
//!
//! - concepts at any depth below `message:Concepts`, so both flat lists and
//!   concepts grouped in a `ConceptScheme` are found
//! - code lists directly below `message:CodeLists`
//! - key families directly below `message:KeyFamilies`

use crate::error::ParseError;
use crate::types::{
    Code, CodeList, Concept, Dimension, DimensionRole, KeyFamily, LocalizedText, MetadataDocument,
};
use sdmx_core::{Document, NamePattern, NodeRef, ns};
use std::io::BufRead;

const CONCEPTS: NamePattern = NamePattern::qualified(&[ns::MESSAGE], "Concepts");
const CODE_LISTS: NamePattern = NamePattern::qualified(&[ns::MESSAGE], "CodeLists");
const KEY_FAMILIES: NamePattern = NamePattern::qualified(&[ns::MESSAGE], "KeyFamilies");

const CONCEPT: NamePattern = NamePattern::qualified(&[ns::STRUCTURE], "Concept");
const CODE_LIST: NamePattern = NamePattern::qualified(&[ns::STRUCTURE], "CodeList");
const CODE: NamePattern = NamePattern::qualified(&[ns::STRUCTURE], "Code");
const KEY_FAMILY: NamePattern = NamePattern::qualified(&[ns::STRUCTURE], "KeyFamily");
const COMPONENTS: NamePattern = NamePattern::qualified(&[ns::STRUCTURE], "Components");
const NAME: NamePattern = NamePattern::qualified(&[ns::STRUCTURE], "Name");
const DESCRIPTION: NamePattern = NamePattern::qualified(&[ns::STRUCTURE], "Description");

/// Parses a structure document from a string.
///
/// # Arguments
/// * `xml` - SDMX-ML 2.0 structure message
///
/// # Returns
/// Parsed metadata document or parse error.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed or a required attribute is
/// missing.
pub fn parse_structure(xml: &str) -> Result<MetadataDocument, ParseError> {
    let document = Document::parse(xml)?;
    from_document(&document)
}

/// Parses a structure document from a buffered byte source.
///
/// # Errors
/// Returns `ParseError` if the input cannot be read, is malformed, or a
/// required attribute is missing.
pub fn read_structure<R: BufRead>(source: R) -> Result<MetadataDocument, ParseError> {
    let document = Document::read(source)?;
    from_document(&document)
}

/// Extracts the metadata entities from an already materialized document.
///
/// # Errors
/// Returns `ParseError` if a required attribute is missing or a key family
/// declares its time dimension or primary measure twice.
pub fn from_document(document: &Document) -> Result<MetadataDocument, ParseError> {
    let root = document.root();
    let mut metadata = MetadataDocument::new();

    for container in root.find_all(&[CONCEPTS]) {
        for node in container.descendants(&CONCEPT) {
            metadata.add_concept(parse_concept(node)?);
        }
    }

    for node in root.find_all(&[CODE_LISTS, CODE_LIST]) {
        metadata.add_code_list(parse_code_list(node)?);
    }

    for node in root.find_all(&[KEY_FAMILIES, KEY_FAMILY]) {
        metadata.add_key_family(parse_key_family(node)?);
    }

    tracing::debug!(
        concepts = metadata.concepts().len(),
        code_lists = metadata.code_lists().len(),
        key_families = metadata.key_families().len(),
        "parsed structure document"
    );

    Ok(metadata)
}

/// Parses a concept element.
fn parse_concept(node: NodeRef<'_>) -> Result<Concept, ParseError> {
    let (id, agency_id) = parse_identity(node)?;
    Ok(Concept {
        id,
        agency_id,
        names: parse_labels(node, &NAME),
    })
}

/// Parses a code list element with its codes.
fn parse_code_list(node: NodeRef<'_>) -> Result<CodeList, ParseError> {
    let (id, agency_id) = parse_identity(node)?;
    let mut code_list = CodeList::new(id);
    code_list.agency_id = agency_id;
    code_list.names = parse_labels(node, &NAME);

    for child in node.children().filter(|child| CODE.matches(child.name())) {
        code_list.add_code(parse_code(child)?);
    }

    Ok(code_list)
}

/// Parses a code element.
fn parse_code(node: NodeRef<'_>) -> Result<Code, ParseError> {
    let mut value = None;
    let mut parent = None;

    for (key, attr) in &node.element().attributes {
        match key.as_str() {
            "value" => value = Some(attr.clone()),
            // An empty parentCode marks a root code.
            "parentCode" if !attr.is_empty() => parent = Some(attr.clone()),
            _ => {}
        }
    }

    Ok(Code {
        value: value.ok_or_else(|| ParseError::missing_attr("Code", "value"))?,
        descriptions: parse_labels(node, &DESCRIPTION),
        parent,
    })
}

/// Parses a key family element with its components.
fn parse_key_family(node: NodeRef<'_>) -> Result<KeyFamily, ParseError> {
    let (id, agency_id) = parse_identity(node)?;
    let mut key_family = KeyFamily::new(id);
    key_family.agency_id = agency_id;
    key_family.names = parse_labels(node, &NAME);

    for component in node.find_all(&[COMPONENTS]).iter().flat_map(|c| c.children()) {
        if component.name().namespace.as_deref() != Some(ns::STRUCTURE) {
            continue;
        }
        let role = match component.name().local_name.as_str() {
            "Dimension" => DimensionRole::Dimension,
            "TimeDimension" => DimensionRole::Time,
            "PrimaryMeasure" => DimensionRole::PrimaryMeasure,
            // Attributes, groups and cross-sectional measures are not part
            // of the key.
            _ => continue,
        };
        let dimension = parse_dimension(component, role)?;
        if let Err(rejected) = key_family.add_component(dimension) {
            return Err(ParseError::duplicate(
                rejected.role.element_name(),
                key_family.id,
            ));
        }
    }

    Ok(key_family)
}

/// Parses a `Dimension`, `TimeDimension` or `PrimaryMeasure` element.
fn parse_dimension(node: NodeRef<'_>, role: DimensionRole) -> Result<Dimension, ParseError> {
    let mut concept_ref = None;
    let mut code_list_id = None;

    for (key, value) in &node.element().attributes {
        match key.as_str() {
            "conceptRef" => concept_ref = Some(value.clone()),
            "codelist" if !value.is_empty() => code_list_id = Some(value.clone()),
            _ => {}
        }
    }

    let concept_ref =
        concept_ref.ok_or_else(|| ParseError::missing_attr(role.element_name(), "conceptRef"))?;
    Ok(Dimension {
        concept_ref,
        code_list_id,
        role,
    })
}

/// Reads the `id` and optional `agencyID` attributes.
fn parse_identity(node: NodeRef<'_>) -> Result<(String, Option<String>), ParseError> {
    let id = node
        .attribute("id")
        .ok_or_else(|| ParseError::missing_attr(node.name().local_name.as_str(), "id"))?;
    let agency_id = node.attribute("agencyID").map(str::to_string);
    Ok((id.to_string(), agency_id))
}

/// Collects the trimmed text of the children matching `pattern`, keyed by
/// `xml:lang`. Labels without a language are stored under the empty string.
fn parse_labels(node: NodeRef<'_>, pattern: &NamePattern) -> LocalizedText {
    let mut labels = LocalizedText::new();
    for child in node.children().filter(|child| pattern.matches(child.name())) {
        let lang = child.attribute("xml:lang").unwrap_or_default();
        labels.insert(lang, child.inner_text().trim());
    }
    labels
}
