//! Core datatype descriptors.
//!
//! Metaschema datatypes come in two shapes: simple restrictions of a
//! base type (usually with a validation pattern) and complex types
//! built from an ordered list of other datatypes. The two-variant sum
//! type is matched exhaustively everywhere, so there is no "neither
//! kind" failure mode at generation time.

use serde::{Deserialize, Serialize};

/// A core datatype descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DataType {
    /// A restriction of a base type, usually pattern-constrained.
    Simple(SimpleDataType),
    /// A structured type composed of other datatypes.
    Complex(ComplexDataType),
}

impl DataType {
    /// Returns the generation identifier for this datatype.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Simple(s) => &s.name,
            Self::Complex(c) => &c.name,
        }
    }

    /// Returns the name other elements use to reference this datatype
    /// via `@as-type`/`@ref`, or `None` if it is not independently
    /// referenceable. An empty `ref_name` counts as not referenceable.
    #[must_use]
    pub fn ref_name(&self) -> Option<&str> {
        let ref_name = match self {
            Self::Simple(s) => s.ref_name.as_deref(),
            Self::Complex(c) => c.ref_name.as_deref(),
        };
        ref_name.filter(|r| !r.is_empty())
    }
}

/// A simple restriction datatype.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleDataType {
    /// Generation identifier (class name).
    pub name: String,
    /// Reference name, if independently referenceable.
    pub ref_name: Option<String>,
    /// Base type: either another catalog datatype or a host primitive.
    pub base_type: String,
    /// Validation pattern, if declared.
    pub pattern: Option<String>,
    /// Documentation lines.
    pub description: Vec<String>,
}

impl SimpleDataType {
    /// Creates a simple datatype with no pattern or documentation.
    #[must_use]
    pub fn new(name: String, ref_name: Option<String>, base_type: String) -> Self {
        Self {
            name,
            ref_name,
            base_type,
            pattern: None,
            description: Vec::new(),
        }
    }
}

/// A complex datatype composed of other datatypes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplexDataType {
    /// Generation identifier (class name).
    pub name: String,
    /// Reference name, if independently referenceable.
    pub ref_name: Option<String>,
    /// Ordered component datatypes.
    pub elements: Vec<DataType>,
    /// Documentation, if present.
    pub description: Option<String>,
}

impl ComplexDataType {
    /// Creates a complex datatype with no elements.
    #[must_use]
    pub fn new(name: String, ref_name: Option<String>) -> Self {
        Self {
            name,
            ref_name,
            elements: Vec::new(),
            description: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datatype_name() {
        let simple = DataType::Simple(SimpleDataType::new(
            "StringDatatype".to_string(),
            Some("string".to_string()),
            "xs:string".to_string(),
        ));
        assert_eq!(simple.name(), "StringDatatype");

        let complex = DataType::Complex(ComplexDataType::new("MarkupLine".to_string(), None));
        assert_eq!(complex.name(), "MarkupLine");
    }

    #[test]
    fn test_ref_name_present() {
        let dt = DataType::Simple(SimpleDataType::new(
            "TokenDatatype".to_string(),
            Some("token".to_string()),
            "StringDatatype".to_string(),
        ));
        assert_eq!(dt.ref_name(), Some("token"));
    }

    #[test]
    fn test_ref_name_absent_or_empty() {
        let none = DataType::Complex(ComplexDataType::new("Internal".to_string(), None));
        assert_eq!(none.ref_name(), None);

        let empty = DataType::Complex(ComplexDataType::new(
            "AlsoInternal".to_string(),
            Some(String::new()),
        ));
        assert_eq!(empty.ref_name(), None);
    }
}
