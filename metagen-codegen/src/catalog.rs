//! Datatype catalog builder.
//!
//! Converts the parsed datatype descriptors into generation-ready
//! records. Datatypes can inherit from each other or from a host
//! primitive; only inheritance from another catalog datatype is
//! recorded as a parent. A datatype with a catalog parent drops its
//! own pattern, since the parent's pattern applies transitively.

use std::collections::HashSet;

use metagen_schema::DataType;

/// One generation-ready datatype record.
#[derive(Debug, Clone)]
pub enum DatatypeRecord {
    /// A simple restriction datatype.
    Simple {
        /// Class name.
        name: String,
        /// Joined documentation, if any.
        description: Option<String>,
        /// Own validation pattern; `None` when a parent is recorded.
        pattern: Option<String>,
        /// Catalog parent class name, if the base type is itself a
        /// catalog datatype.
        parent: Option<String>,
    },
    /// A complex datatype.
    Complex {
        /// Class name.
        name: String,
        /// Documentation, if any.
        description: Option<String>,
        /// Ordered component datatype names.
        elements: Vec<String>,
    },
}

impl DatatypeRecord {
    /// Returns the record's class name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Simple { name, .. } | Self::Complex { name, .. } => name,
        }
    }
}

/// Builds the ordered catalog of generation records from the parsed
/// datatype descriptors.
#[must_use]
pub fn build_catalog(datatypes: &[DataType]) -> Vec<DatatypeRecord> {
    // Names of all catalog datatypes; a base type found here means
    // inheritance from a schema-defined datatype rather than from a
    // host primitive.
    let catalog_names: HashSet<&str> = datatypes.iter().map(DataType::name).collect();

    datatypes
        .iter()
        .map(|datatype| match datatype {
            DataType::Simple(simple) => {
                let description = if simple.description.is_empty() {
                    None
                } else {
                    Some(simple.description.concat())
                };

                let (parent, pattern) = if catalog_names.contains(simple.base_type.as_str()) {
                    (Some(simple.base_type.clone()), None)
                } else {
                    (None, simple.pattern.clone())
                };

                DatatypeRecord::Simple {
                    name: simple.name.clone(),
                    description,
                    pattern,
                    parent,
                }
            }
            DataType::Complex(complex) => DatatypeRecord::Complex {
                name: complex.name.clone(),
                description: complex.description.clone(),
                elements: complex.elements.iter().map(|e| e.name().to_string()).collect(),
            },
        })
        .collect()
}
