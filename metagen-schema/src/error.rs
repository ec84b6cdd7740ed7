//! Error types for the parsed metaschema model.

use thiserror::Error;

/// Error type for model construction and boundary validation.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A required attribute is absent from a declaration.
    #[error("missing required attribute '{attribute}' on {element} declaration '{name}'")]
    MissingAttribute {
        /// Declaration kind ("define-flag", "define-field", "define-assembly").
        element: String,
        /// Declaration name, or "<unnamed>" when the name itself is missing.
        name: String,
        /// Missing attribute name.
        attribute: String,
    },

    /// A required child element is absent from a declaration.
    #[error("missing required child '{child}' on {element} declaration '{name}'")]
    MissingChild {
        /// Declaration kind.
        element: String,
        /// Declaration name.
        name: String,
        /// Missing child element name.
        child: String,
    },

    /// Invalid attribute value.
    #[error("invalid value '{value}' for attribute '{attribute}' on {element} declaration")]
    InvalidAttribute {
        /// Declaration kind.
        element: String,
        /// Attribute name.
        attribute: String,
        /// Invalid value.
        value: String,
    },
}

impl SchemaError {
    /// Creates a missing attribute error.
    pub fn missing_attr(
        element: impl Into<String>,
        name: Option<&str>,
        attribute: impl Into<String>,
    ) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            name: name.unwrap_or("<unnamed>").to_string(),
            attribute: attribute.into(),
        }
    }

    /// Creates a missing child element error.
    pub fn missing_child(
        element: impl Into<String>,
        name: Option<&str>,
        child: impl Into<String>,
    ) -> Self {
        Self::MissingChild {
            element: element.into(),
            name: name.unwrap_or("<unnamed>").to_string(),
            child: child.into(),
        }
    }
}
