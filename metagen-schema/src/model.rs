//! Parsed metaschema model.
//!
//! This module contains the data structures representing one parsed
//! metaschema module and the full set of modules handed to the code
//! generator. Instances are produced by an external parser; the
//! generator only reads them.

use serde::{Deserialize, Serialize};

use crate::datatypes::DataType;

/// The full collection of parsed metaschema modules plus the datatype
/// catalog. Immutable once parsing completes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetaschemaSet {
    /// Parsed metaschema modules, in parse order.
    pub metaschemas: Vec<Metaschema>,
    /// Core datatype descriptors, in declaration order.
    pub datatypes: Vec<DataType>,
}

impl MetaschemaSet {
    /// Creates an empty metaschema set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parsed metaschema module.
    pub fn add_metaschema(&mut self, metaschema: Metaschema) {
        self.metaschemas.push(metaschema);
    }

    /// Adds a datatype descriptor.
    pub fn add_datatype(&mut self, datatype: DataType) {
        self.datatypes.push(datatype);
    }
}

/// One metaschema module's parsed form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metaschema {
    /// Origin identity, used as a stable source key for imports.
    pub file: String,
    /// Human identifier, sanitized into the module identifier.
    pub short_name: String,
    /// Declared schema version.
    pub schema_version: String,
    /// Imported modules, in declaration order.
    pub imports: Vec<ImportDecl>,
    /// Exported ("global") names, in declaration order.
    pub globals: Vec<GlobalDecl>,
    /// Top-level assembly declarations.
    pub assemblies: Vec<AssemblyDecl>,
    /// Top-level field declarations.
    pub fields: Vec<FieldDecl>,
    /// Top-level flag declarations.
    pub flags: Vec<FlagDecl>,
}

impl Metaschema {
    /// Creates a new metaschema module with no declarations.
    #[must_use]
    pub fn new(file: String, short_name: String, schema_version: String) -> Self {
        Self {
            file,
            short_name,
            schema_version,
            imports: Vec::new(),
            globals: Vec::new(),
            assemblies: Vec::new(),
            fields: Vec::new(),
            flags: Vec::new(),
        }
    }

    /// Adds an import declaration.
    pub fn add_import(&mut self, href: impl Into<String>) {
        self.imports.push(ImportDecl { href: href.into() });
    }

    /// Adds an exported global name.
    pub fn add_global(&mut self, name: impl Into<String>, target: impl Into<String>) {
        self.globals.push(GlobalDecl {
            name: name.into(),
            target: target.into(),
        });
    }

    /// Returns true if the module declares no top-level elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assemblies.is_empty() && self.fields.is_empty() && self.flags.is_empty()
    }
}

/// An `import` declaration referencing another metaschema by origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportDecl {
    /// The imported module's origin key (`@href`).
    pub href: String,
}

/// One exported name: `exported name -> declared target name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalDecl {
    /// Exported name, referenced by other modules via `@ref`/`@as-type`.
    pub name: String,
    /// Declared target name inside the defining module.
    pub target: String,
}

/// A `define-flag` declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlagDecl {
    /// Flag name (`@name`).
    pub name: String,
    /// Formal name, sanitized into the generated class name.
    pub formal_name: String,
    /// Referenced datatype (`@as-type`).
    pub as_type: String,
    /// Description markup, if present.
    pub description: Option<String>,
    /// Alternate name used where the flag is instantiated.
    pub use_name: Option<String>,
    /// Declared constraints, grouped by kind.
    pub constraints: Vec<ConstraintDecl>,
}

impl FlagDecl {
    /// Returns the effective name: `use-name` when present, else `@name`.
    #[must_use]
    pub fn effective_name(&self) -> &str {
        self.use_name.as_deref().unwrap_or(&self.name)
    }
}

/// A `define-field` declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDecl {
    /// Field name (`@name`).
    pub name: String,
    /// Formal name, sanitized into the generated class name.
    pub formal_name: String,
    /// Referenced datatype (`@as-type`).
    pub as_type: String,
    /// Description markup, if present.
    pub description: Option<String>,
    /// Alternate name used where the field is instantiated.
    pub use_name: Option<String>,
    /// `prop` children.
    pub props: Vec<Prop>,
    /// Inline `define-flag` children. Not separately exported.
    pub flags: Vec<FlagDecl>,
    /// Declared constraints, grouped by kind.
    pub constraints: Vec<ConstraintDecl>,
}

impl FieldDecl {
    /// Returns the effective name: `use-name` when present, else `@name`.
    #[must_use]
    pub fn effective_name(&self) -> &str {
        self.use_name.as_deref().unwrap_or(&self.name)
    }
}

/// A `define-assembly` declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssemblyDecl {
    /// Assembly name (`@name`).
    pub name: String,
    /// Formal name, sanitized into the generated class name.
    pub formal_name: String,
    /// Description markup, if present.
    pub description: Option<String>,
    /// Alternate name used where the assembly is instantiated.
    pub use_name: Option<String>,
    /// Root element name, present on document-root assemblies.
    pub root_name: Option<String>,
    /// `prop` children.
    pub props: Vec<Prop>,
    /// Inline `define-flag` children. Not separately exported.
    pub flags: Vec<FlagDecl>,
    /// Model children referencing other elements by exported name.
    pub model_refs: Vec<String>,
    /// Declared constraints, grouped by kind.
    pub constraints: Vec<ConstraintDecl>,
}

impl AssemblyDecl {
    /// Returns the effective name: `use-name` when present, else `@name`.
    #[must_use]
    pub fn effective_name(&self) -> &str {
        self.use_name.as_deref().unwrap_or(&self.name)
    }

    /// Returns true if this assembly declares a document root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.root_name.is_some()
    }
}

/// A `prop` child: `(name, value, namespace)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prop {
    /// Property name (`@name`).
    pub name: String,
    /// Property value (`@value`).
    pub value: String,
    /// Property namespace (`@namespace`); the generator fills in the
    /// metaschema namespace when absent.
    pub namespace: Option<String>,
}

/// Constraints of one kind declared on an element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstraintDecl {
    /// Constraint kind ("allowed-values", "matches", ...).
    pub kind: String,
    /// Occurrences of this kind, in declaration order.
    pub occurrences: Vec<ConstraintOccurrence>,
}

/// One constraint occurrence's declared attributes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConstraintOccurrence {
    /// Constraint name (`@name`), if declared.
    pub name: Option<String>,
    /// Constraint target (`@target`); defaults to "." at generation time.
    pub target: Option<String>,
    /// Severity level (`@level`); defaults to "ERROR" at generation time.
    pub level: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metaschema_set_new() {
        let set = MetaschemaSet::new();
        assert!(set.metaschemas.is_empty());
        assert!(set.datatypes.is_empty());
    }

    #[test]
    fn test_metaschema_add_global_preserves_order() {
        let mut m = Metaschema::new(
            "common.xml".to_string(),
            "common".to_string(),
            "1.0".to_string(),
        );
        m.add_global("second-thing", "SecondThing");
        m.add_global("first-thing", "FirstThing");

        assert_eq!(m.globals[0].name, "second-thing");
        assert_eq!(m.globals[1].name, "first-thing");
    }

    #[test]
    fn test_effective_name_prefers_use_name() {
        let flag = FlagDecl {
            name: "location-uuid".to_string(),
            formal_name: "Location UUID".to_string(),
            as_type: "uuid".to_string(),
            description: None,
            use_name: Some("uuid".to_string()),
            constraints: Vec::new(),
        };
        assert_eq!(flag.effective_name(), "uuid");
    }

    #[test]
    fn test_effective_name_falls_back_to_name() {
        let field = FieldDecl {
            name: "remarks".to_string(),
            formal_name: "Remarks".to_string(),
            as_type: "markup-multiline".to_string(),
            description: None,
            use_name: None,
            props: Vec::new(),
            flags: Vec::new(),
            constraints: Vec::new(),
        };
        assert_eq!(field.effective_name(), "remarks");
    }

    #[test]
    fn test_assembly_is_root() {
        let mut assembly = AssemblyDecl {
            name: "catalog".to_string(),
            formal_name: "Catalog".to_string(),
            description: None,
            use_name: None,
            root_name: None,
            props: Vec::new(),
            flags: Vec::new(),
            model_refs: Vec::new(),
            constraints: Vec::new(),
        };
        assert!(!assembly.is_root());

        assembly.root_name = Some("catalog".to_string());
        assert!(assembly.is_root());
    }
}
