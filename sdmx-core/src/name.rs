//! Qualified element names and the patterns used to match them.

use std::fmt;

/// Namespace URIs used by SDMX-ML 2.0 messages.
pub mod ns {
    /// Message envelope namespace.
    pub const MESSAGE: &str = "http://www.SDMX.org/resources/SDMXML/schemas/v2_0/message";
    /// Generic data namespace.
    pub const GENERIC: &str = "http://www.SDMX.org/resources/SDMXML/schemas/v2_0/generic";
    /// Structure (metadata) namespace.
    pub const STRUCTURE: &str = "http://www.SDMX.org/resources/SDMXML/schemas/v2_0/structure";
    /// Common components namespace.
    pub const COMMON: &str = "http://www.SDMX.org/resources/SDMXML/schemas/v2_0/common";
    /// Reserved `xml:` namespace.
    pub const XML: &str = "http://www.w3.org/XML/1998/namespace";
}

/// Namespace-resolved element name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    /// Namespace URI, if the element is bound to one.
    pub namespace: Option<String>,
    /// Local part of the name.
    pub local_name: String,
}

impl QName {
    /// Creates a name bound to `namespace`.
    #[must_use]
    pub fn new(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            local_name: local_name.into(),
        }
    }

    /// Creates a name without a namespace.
    #[must_use]
    pub fn local(local_name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local_name: local_name.into(),
        }
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(namespace) => write!(f, "{{{}}}{}", namespace, self.local_name),
            None => f.write_str(&self.local_name),
        }
    }
}

/// Static pattern matched against element names.
///
/// An empty namespace list matches the local name in any namespace, which is
/// how dataset-specific compact elements are found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamePattern {
    namespaces: &'static [&'static str],
    local_name: &'static str,
}

impl NamePattern {
    /// Matches `local_name` in any of the given namespaces.
    #[must_use]
    pub const fn qualified(namespaces: &'static [&'static str], local_name: &'static str) -> Self {
        Self {
            namespaces,
            local_name,
        }
    }

    /// Matches `local_name` regardless of namespace.
    #[must_use]
    pub const fn local(local_name: &'static str) -> Self {
        Self {
            namespaces: &[],
            local_name,
        }
    }

    /// Returns the local name this pattern looks for.
    #[must_use]
    pub const fn local_name(&self) -> &'static str {
        self.local_name
    }

    /// Returns true if `name` satisfies the pattern.
    #[must_use]
    pub fn matches(&self, name: &QName) -> bool {
        if name.local_name != self.local_name {
            return false;
        }
        if self.namespaces.is_empty() {
            return true;
        }
        name.namespace
            .as_deref()
            .is_some_and(|ns| self.namespaces.contains(&ns))
    }
}

impl fmt::Display for NamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.namespaces {
            [] => write!(f, "{{*}}{}", self.local_name),
            [single] => write!(f, "{{{}}}{}", single, self.local_name),
            many => write!(f, "{{{}}}{}", many.join("|"), self.local_name),
        }
    }
}
