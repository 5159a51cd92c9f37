//! Code hierarchy resolution.
//!
//! Codes refer to their parent by value within the same code list. The
//! chain is followed by repeated lookup; a chain can visit at most as many
//! codes as the list holds, so a longer walk means the chain loops.

use crate::error::StructureError;
use crate::types::{Code, CodeList};

/// Returns the chain of codes from `value` up to its root ancestor, leaf
/// first.
///
/// Surrounding whitespace in `value` is ignored.
///
/// # Errors
/// Returns `StructureError::UnknownCode` if the value or one of its
/// ancestors is not in the list, or `StructureError::CyclicHierarchy` if
/// the parent chain loops.
pub fn ancestry<'a>(code_list: &'a CodeList, value: &str) -> Result<Vec<&'a Code>, StructureError> {
    let mut chain: Vec<&Code> = Vec::new();
    let mut current = Some(value.trim());

    while let Some(value) = current {
        let code = code_list
            .code(value)
            .ok_or_else(|| StructureError::unknown_code(&code_list.id, value))?;
        if chain.len() >= code_list.len() {
            return Err(StructureError::CyclicHierarchy {
                code_list: code_list.id.clone(),
                value: value.to_string(),
            });
        }
        chain.push(code);
        current = code.parent_value().map(str::trim);
    }

    Ok(chain)
}

/// Describes a code as the labels of its ancestors followed by its own,
/// in language `lang`.
///
/// The root ancestor's description comes first and the code's own
/// description last.
///
/// # Errors
/// Returns the errors of [`ancestry`], or `StructureError::MissingLabel`
/// if a code on the chain has no description in `lang`.
pub fn describe_code(
    code_list: &CodeList,
    value: &str,
    lang: &str,
) -> Result<Vec<String>, StructureError> {
    let mut labels = ancestry(code_list, value)?
        .into_iter()
        .map(|code| {
            code.description(lang)
                .map(str::to_string)
                .ok_or_else(|| StructureError::missing_label("code", &code.value, lang))
        })
        .collect::<Result<Vec<_>, _>>()?;
    labels.reverse();
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(value: &str, parent: Option<&str>, label: &str) -> Code {
        let mut code = Code::new(value);
        code.parent = parent.map(str::to_string);
        code.descriptions.insert("en", label);
        code
    }

    fn indicators() -> CodeList {
        let mut code_list = CodeList::new("CL_MON2012TSE_O_INDIC");
        code_list.add_code(code(
            "TO-VP",
            None,
            "Total value of production (at farm gate)",
        ));
        code_list.add_code(code(
            "TO-VP1P",
            Some("TO-VP"),
            "of which: share of MPS commodities, percentage",
        ));
        code_list
    }

    #[test]
    fn test_root_code_has_single_label() {
        let labels = describe_code(&indicators(), "TO-VP", "en").unwrap();
        assert_eq!(labels, vec!["Total value of production (at farm gate)"]);
    }

    #[test]
    fn test_child_code_lists_root_first() {
        let labels = describe_code(&indicators(), "TO-VP1P", "en").unwrap();
        assert_eq!(
            labels,
            vec![
                "Total value of production (at farm gate)",
                "of which: share of MPS commodities, percentage",
            ]
        );
    }

    #[test]
    fn test_value_is_trimmed() {
        let labels = describe_code(&indicators(), "\n  TO-VP1P \n", "en").unwrap();
        assert_eq!(labels.len(), 2);
    }

    #[test]
    fn test_unknown_code() {
        let err = describe_code(&indicators(), "XX", "en").unwrap_err();
        assert!(matches!(
            err,
            StructureError::UnknownCode { ref value, .. } if value == "XX"
        ));
    }

    #[test]
    fn test_dangling_parent() {
        let mut code_list = CodeList::new("CL");
        code_list.add_code(code("40000", Some("41000"), "Total"));

        let err = describe_code(&code_list, "40000", "en").unwrap_err();
        assert!(matches!(
            err,
            StructureError::UnknownCode { ref value, .. } if value == "41000"
        ));
    }

    #[test]
    fn test_missing_language() {
        let err = describe_code(&indicators(), "TO-VP1P", "fr").unwrap_err();
        assert!(matches!(err, StructureError::MissingLabel { .. }));
    }

    #[test]
    fn test_cycle_fails_fast() {
        let mut code_list = CodeList::new("CL");
        code_list.add_code(code("A", Some("B"), "a"));
        code_list.add_code(code("B", Some("A"), "b"));

        let err = describe_code(&code_list, "A", "en").unwrap_err();
        assert!(matches!(err, StructureError::CyclicHierarchy { .. }));
    }

    #[test]
    fn test_self_parent_is_a_cycle() {
        let mut code_list = CodeList::new("CL");
        code_list.add_code(code("A", Some("A"), "a"));

        assert!(matches!(
            ancestry(&code_list, "A"),
            Err(StructureError::CyclicHierarchy { .. })
        ));
    }

    #[test]
    fn test_ancestry_is_leaf_first() {
        let code_list = indicators();
        let chain = ancestry(&code_list, "TO-VP1P").unwrap();
        let values: Vec<_> = chain.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["TO-VP1P", "TO-VP"]);
    }
}
