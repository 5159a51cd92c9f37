//! Metadata document definitions.
//!
//! This module contains the data structures a metadata (DSD) document is
//! parsed into: concepts, code lists with their codes, and key families with
//! their dimensions. All of them are immutable once the document is built.

use crate::error::StructureError;
use std::collections::HashMap;

/// Text keyed by `xml:lang`, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizedText {
    entries: Vec<(String, String)>,
}

impl LocalizedText {
    /// Creates an empty set of labels.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a label. A later label for the same language does not replace
    /// the first one.
    pub fn insert(&mut self, lang: impl Into<String>, text: impl Into<String>) {
        let lang = lang.into();
        if self.get(&lang).is_none() {
            self.entries.push((lang, text.into()));
        }
    }

    /// Returns the label for `lang`.
    #[must_use]
    pub fn get(&self, lang: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| l == lang)
            .map(|(_, text)| text.as_str())
    }

    /// Iterates over `(lang, text)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(lang, text)| (lang.as_str(), text.as_str()))
    }

    /// Returns true if there are no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Concept definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Concept {
    /// Concept identifier.
    pub id: String,
    /// Maintenance agency.
    pub agency_id: Option<String>,
    /// Names by language.
    pub names: LocalizedText,
}

impl Concept {
    /// Creates a concept without names.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            agency_id: None,
            names: LocalizedText::new(),
        }
    }

    /// Returns the name in `lang`.
    #[must_use]
    pub fn name(&self, lang: &str) -> Option<&str> {
        self.names.get(lang)
    }
}

/// A permitted value of a coded dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code {
    /// Code value as it appears in data messages.
    pub value: String,
    /// Descriptions by language.
    pub descriptions: LocalizedText,
    /// Value of the parent code within the same code list.
    pub parent: Option<String>,
}

impl Code {
    /// Creates a root code without descriptions.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            descriptions: LocalizedText::new(),
            parent: None,
        }
    }

    /// Returns the description in `lang`.
    #[must_use]
    pub fn description(&self, lang: &str) -> Option<&str> {
        self.descriptions.get(lang)
    }

    /// Returns the parent code value, if any.
    #[must_use]
    pub fn parent_value(&self) -> Option<&str> {
        self.parent.as_deref()
    }
}

/// Code list definition.
#[derive(Debug, Clone)]
pub struct CodeList {
    /// Code list identifier.
    pub id: String,
    /// Maintenance agency.
    pub agency_id: Option<String>,
    /// Names by language.
    pub names: LocalizedText,
    codes: Vec<Code>,
    /// Code lookup map (built while parsing).
    code_map: HashMap<String, usize>,
}

impl CodeList {
    /// Creates an empty code list.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            agency_id: None,
            names: LocalizedText::new(),
            codes: Vec::new(),
            code_map: HashMap::new(),
        }
    }

    /// Adds a code. Lookups resolve to the first code with a given value.
    pub fn add_code(&mut self, code: Code) {
        let index = self.codes.len();
        self.code_map.entry(code.value.clone()).or_insert(index);
        self.codes.push(code);
    }

    /// Looks up a code by value.
    #[must_use]
    pub fn code(&self, value: &str) -> Option<&Code> {
        self.code_map.get(value).map(|&idx| &self.codes[idx])
    }

    /// Returns all codes in document order.
    #[must_use]
    pub fn codes(&self) -> &[Code] {
        &self.codes
    }

    /// Returns the name in `lang`.
    #[must_use]
    pub fn name(&self, lang: &str) -> Option<&str> {
        self.names.get(lang)
    }

    /// Number of codes in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Returns true if the list has no codes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// Role a component plays in its key family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DimensionRole {
    /// Ordinary key dimension.
    Dimension,
    /// The time dimension.
    Time,
    /// The primary measure (observation value).
    PrimaryMeasure,
}

impl DimensionRole {
    /// Element name of the component in a structure document.
    #[must_use]
    pub const fn element_name(&self) -> &'static str {
        match self {
            Self::Dimension => "Dimension",
            Self::Time => "TimeDimension",
            Self::PrimaryMeasure => "PrimaryMeasure",
        }
    }
}

/// Key family component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dimension {
    /// Referenced concept.
    pub concept_ref: String,
    /// Code list constraining the values, absent for uncoded components.
    pub code_list_id: Option<String>,
    /// Component role.
    pub role: DimensionRole,
}

impl Dimension {
    /// Creates a component.
    #[must_use]
    pub fn new(concept_ref: impl Into<String>, role: DimensionRole) -> Self {
        Self {
            concept_ref: concept_ref.into(),
            code_list_id: None,
            role,
        }
    }

    /// Sets the code list, builder style.
    #[must_use]
    pub fn with_code_list(mut self, code_list_id: impl Into<String>) -> Self {
        self.code_list_id = Some(code_list_id.into());
        self
    }

    /// Returns true if values are drawn from a code list.
    #[must_use]
    pub fn is_coded(&self) -> bool {
        self.code_list_id.is_some()
    }
}

/// Key family (data structure definition).
#[derive(Debug, Clone)]
pub struct KeyFamily {
    /// Key family identifier.
    pub id: String,
    /// Maintenance agency.
    pub agency_id: Option<String>,
    /// Names by language.
    pub names: LocalizedText,
    dimensions: Vec<Dimension>,
    time_dimension: Option<Dimension>,
    primary_measure: Option<Dimension>,
}

impl KeyFamily {
    /// Creates a key family without components.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            agency_id: None,
            names: LocalizedText::new(),
            dimensions: Vec::new(),
            time_dimension: None,
            primary_measure: None,
        }
    }

    /// Returns the name in `lang`.
    #[must_use]
    pub fn name(&self, lang: &str) -> Option<&str> {
        self.names.get(lang)
    }

    /// Ordinary dimensions in document order.
    #[must_use]
    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    /// Finds an ordinary dimension by concept reference.
    #[must_use]
    pub fn dimension(&self, concept_ref: &str) -> Option<&Dimension> {
        self.dimensions
            .iter()
            .find(|dimension| dimension.concept_ref == concept_ref)
    }

    /// Returns the time dimension.
    ///
    /// # Errors
    /// Returns `StructureError::MissingComponent` if none is defined.
    pub fn time_dimension(&self) -> Result<&Dimension, StructureError> {
        self.time_dimension
            .as_ref()
            .ok_or_else(|| self.missing(DimensionRole::Time))
    }

    /// Returns the primary measure.
    ///
    /// # Errors
    /// Returns `StructureError::MissingComponent` if none is defined.
    pub fn primary_measure(&self) -> Result<&Dimension, StructureError> {
        self.primary_measure
            .as_ref()
            .ok_or_else(|| self.missing(DimensionRole::PrimaryMeasure))
    }

    /// Iterates over every component: ordinary dimensions, then the time
    /// dimension, then the primary measure.
    pub fn components(&self) -> impl Iterator<Item = &Dimension> {
        self.dimensions
            .iter()
            .chain(self.time_dimension.as_ref())
            .chain(self.primary_measure.as_ref())
    }

    /// Adds a component according to its role.
    ///
    /// Returns the component back if its role is already filled.
    ///
    /// # Errors
    /// Returns the rejected component for a second time dimension or
    /// primary measure.
    pub fn add_component(&mut self, component: Dimension) -> Result<(), Dimension> {
        let slot = match component.role {
            DimensionRole::Dimension => {
                self.dimensions.push(component);
                return Ok(());
            }
            DimensionRole::Time => &mut self.time_dimension,
            DimensionRole::PrimaryMeasure => &mut self.primary_measure,
        };
        if slot.is_some() {
            return Err(component);
        }
        *slot = Some(component);
        Ok(())
    }

    fn missing(&self, role: DimensionRole) -> StructureError {
        StructureError::MissingComponent {
            key_family: self.id.clone(),
            component: role.element_name(),
        }
    }
}

/// Parsed metadata document.
///
/// Entities are kept in document order and indexed by identifier. When an
/// identifier occurs twice, lookups resolve to the first definition.
#[derive(Debug, Clone, Default)]
pub struct MetadataDocument {
    concepts: Vec<Concept>,
    code_lists: Vec<CodeList>,
    key_families: Vec<KeyFamily>,
    concept_map: HashMap<String, usize>,
    code_list_map: HashMap<String, usize>,
    key_family_map: HashMap<String, usize>,
}

impl MetadataDocument {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a concept.
    pub fn add_concept(&mut self, concept: Concept) {
        let index = self.concepts.len();
        self.concept_map.entry(concept.id.clone()).or_insert(index);
        self.concepts.push(concept);
    }

    /// Adds a code list.
    pub fn add_code_list(&mut self, code_list: CodeList) {
        let index = self.code_lists.len();
        self.code_list_map
            .entry(code_list.id.clone())
            .or_insert(index);
        self.code_lists.push(code_list);
    }

    /// Adds a key family.
    pub fn add_key_family(&mut self, key_family: KeyFamily) {
        let index = self.key_families.len();
        self.key_family_map
            .entry(key_family.id.clone())
            .or_insert(index);
        self.key_families.push(key_family);
    }

    /// Looks up a concept by identifier.
    #[must_use]
    pub fn concept(&self, id: &str) -> Option<&Concept> {
        self.concept_map.get(id).map(|&idx| &self.concepts[idx])
    }

    /// Looks up a code list by identifier.
    #[must_use]
    pub fn code_list(&self, id: &str) -> Option<&CodeList> {
        self.code_list_map.get(id).map(|&idx| &self.code_lists[idx])
    }

    /// Looks up a key family by identifier.
    #[must_use]
    pub fn key_family(&self, id: &str) -> Option<&KeyFamily> {
        self.key_family_map.get(id).map(|&idx| &self.key_families[idx])
    }

    /// All concepts in document order.
    #[must_use]
    pub fn concepts(&self) -> &[Concept] {
        &self.concepts
    }

    /// All code lists in document order.
    #[must_use]
    pub fn code_lists(&self) -> &[CodeList] {
        &self.code_lists
    }

    /// All key families in document order.
    #[must_use]
    pub fn key_families(&self) -> &[KeyFamily] {
        &self.key_families
    }

    /// Looks up a concept, failing if it is not defined.
    ///
    /// # Errors
    /// Returns `StructureError::UnknownConcept` for an unknown identifier.
    pub fn require_concept(&self, id: &str) -> Result<&Concept, StructureError> {
        self.concept(id)
            .ok_or_else(|| StructureError::UnknownConcept { id: id.to_string() })
    }

    /// Looks up a code list, failing if it is not defined.
    ///
    /// # Errors
    /// Returns `StructureError::UnknownCodeList` for an unknown identifier.
    pub fn require_code_list(&self, id: &str) -> Result<&CodeList, StructureError> {
        self.code_list(id)
            .ok_or_else(|| StructureError::UnknownCodeList { id: id.to_string() })
    }

    /// Looks up a key family, failing if it is not defined.
    ///
    /// # Errors
    /// Returns `StructureError::UnknownKeyFamily` for an unknown identifier.
    pub fn require_key_family(&self, id: &str) -> Result<&KeyFamily, StructureError> {
        self.key_family(id)
            .ok_or_else(|| StructureError::UnknownKeyFamily { id: id.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_localized_text_first_label_wins() {
        let mut names = LocalizedText::new();
        names.insert("en", "Country");
        names.insert("fr", "Pays");
        names.insert("en", "Nation");

        assert_eq!(names.get("en"), Some("Country"));
        assert_eq!(names.get("fr"), Some("Pays"));
        assert_eq!(names.get("de"), None);
        assert_eq!(names.iter().count(), 2);
    }

    #[test]
    fn test_code_list_lookup() {
        let mut code_list = CodeList::new("CL_INDIC");
        code_list.add_code(Code::new("TO-VP"));
        let mut child = Code::new("TO-VP1P");
        child.parent = Some("TO-VP".to_string());
        code_list.add_code(child);

        assert_eq!(code_list.len(), 2);
        assert_eq!(code_list.code("TO-VP1P").unwrap().parent_value(), Some("TO-VP"));
        assert!(code_list.code("TO-VP").unwrap().parent_value().is_none());
        assert!(code_list.code("missing").is_none());
    }

    #[test]
    fn test_key_family_components() {
        let mut key_family = KeyFamily::new("KF");
        key_family
            .add_component(Dimension::new("COUNTRY", DimensionRole::Dimension))
            .unwrap();
        key_family
            .add_component(Dimension::new("TIME", DimensionRole::Time))
            .unwrap();

        assert_eq!(key_family.dimensions().len(), 1);
        assert_eq!(key_family.time_dimension().unwrap().concept_ref, "TIME");
        assert!(matches!(
            key_family.primary_measure(),
            Err(StructureError::MissingComponent { .. })
        ));
        assert!(
            key_family
                .add_component(Dimension::new("TIME2", DimensionRole::Time))
                .is_err()
        );
        assert_eq!(key_family.components().count(), 2);
    }

    #[test]
    fn test_document_lookups_return_none_for_unknown_ids() {
        let mut document = MetadataDocument::new();
        document.add_concept(Concept::new("COUNTRY"));
        document.add_code_list(CodeList::new("CL_COUNTRY"));

        assert_eq!(document.concept("COUNTRY").unwrap().id, "COUNTRY");
        assert!(document.concept("INDIC").is_none());
        assert!(document.code_list("CL_INDIC").is_none());
        assert!(document.key_family("KF").is_none());
        assert!(matches!(
            document.require_code_list("CL_INDIC"),
            Err(StructureError::UnknownCodeList { .. })
        ));
    }

    #[test]
    fn test_first_definition_wins() {
        let mut document = MetadataDocument::new();
        let mut first = Concept::new("C");
        first.names.insert("en", "First");
        let mut second = Concept::new("C");
        second.names.insert("en", "Second");
        document.add_concept(first);
        document.add_concept(second);

        assert_eq!(document.concepts().len(), 2);
        assert_eq!(document.concept("C").unwrap().name("en"), Some("First"));
    }
}
