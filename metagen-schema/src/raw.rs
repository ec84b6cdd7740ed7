//! Raw declaration boundary.
//!
//! The external parser reads metaschema XML into [`RawDeclaration`]
//! values: string-keyed attribute and child maps that still carry the
//! source format's names (`@name`, `@as-type`, `formal-name`, ...).
//! The conversions here validate required attributes exactly once, at
//! the boundary, so the generators downstream work with typed
//! declarations and never repeat presence checks.

use std::collections::BTreeMap;

use crate::error::SchemaError;
use crate::model::{
    AssemblyDecl, ConstraintDecl, ConstraintOccurrence, FieldDecl, FlagDecl, Prop,
};

/// One element declaration as handed over by the parser.
#[derive(Debug, Clone, Default)]
pub struct RawDeclaration {
    /// XML attributes, keyed with their `@`-prefixed source names.
    pub attributes: BTreeMap<String, String>,
    /// Text-valued child elements (`formal-name`, `description`, ...).
    pub children: BTreeMap<String, String>,
    /// `prop` children, each an attribute map.
    pub props: Vec<BTreeMap<String, String>>,
    /// Nested `define-flag` children.
    pub flags: Vec<RawDeclaration>,
    /// `@ref` values of model children, in declaration order.
    pub model_refs: Vec<String>,
    /// `constraint` children: kind mapped to its occurrences.
    pub constraints: Vec<(String, Vec<BTreeMap<String, String>>)>,
}

impl RawDeclaration {
    /// Creates an empty raw declaration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute, returning self for chaining.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Sets a text child, returning self for chaining.
    #[must_use]
    pub fn with_child(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.children.insert(key.into(), value.into());
        self
    }

    /// Validates this declaration as a `define-flag`.
    ///
    /// # Errors
    /// Returns `SchemaError` if `@name`, `@as-type` or `formal-name`
    /// is absent.
    pub fn to_flag(&self) -> Result<FlagDecl, SchemaError> {
        const ELEMENT: &str = "define-flag";
        Ok(FlagDecl {
            name: self.require_attr(ELEMENT, "@name")?.to_string(),
            as_type: self.require_attr(ELEMENT, "@as-type")?.to_string(),
            formal_name: self.require_child(ELEMENT, "formal-name")?.to_string(),
            description: self.children.get("description").cloned(),
            use_name: self.children.get("use-name").cloned(),
            constraints: self.constraint_decls(),
        })
    }

    /// Validates this declaration as a `define-field`.
    ///
    /// # Errors
    /// Returns `SchemaError` if `@name`, `@as-type` or `formal-name`
    /// is absent, or if a `prop` child lacks `@name`/`@value`, or if a
    /// nested `define-flag` is itself malformed.
    pub fn to_field(&self) -> Result<FieldDecl, SchemaError> {
        const ELEMENT: &str = "define-field";
        Ok(FieldDecl {
            name: self.require_attr(ELEMENT, "@name")?.to_string(),
            as_type: self.require_attr(ELEMENT, "@as-type")?.to_string(),
            formal_name: self.require_child(ELEMENT, "formal-name")?.to_string(),
            description: self.children.get("description").cloned(),
            use_name: self.children.get("use-name").cloned(),
            props: self.prop_decls()?,
            flags: self
                .flags
                .iter()
                .map(RawDeclaration::to_flag)
                .collect::<Result<_, _>>()?,
            constraints: self.constraint_decls(),
        })
    }

    /// Validates this declaration as a `define-assembly`.
    ///
    /// # Errors
    /// Returns `SchemaError` if `@name` or `formal-name` is absent, or
    /// if a child is malformed.
    pub fn to_assembly(&self) -> Result<AssemblyDecl, SchemaError> {
        const ELEMENT: &str = "define-assembly";
        Ok(AssemblyDecl {
            name: self.require_attr(ELEMENT, "@name")?.to_string(),
            formal_name: self.require_child(ELEMENT, "formal-name")?.to_string(),
            description: self.children.get("description").cloned(),
            use_name: self.children.get("use-name").cloned(),
            root_name: self.children.get("root-name").cloned(),
            props: self.prop_decls()?,
            flags: self
                .flags
                .iter()
                .map(RawDeclaration::to_flag)
                .collect::<Result<_, _>>()?,
            model_refs: self.model_refs.clone(),
            constraints: self.constraint_decls(),
        })
    }

    fn require_attr(&self, element: &str, attribute: &str) -> Result<&str, SchemaError> {
        self.attributes
            .get(attribute)
            .map(String::as_str)
            .ok_or_else(|| SchemaError::missing_attr(element, self.declared_name(), attribute))
    }

    fn require_child(&self, element: &str, child: &str) -> Result<&str, SchemaError> {
        self.children
            .get(child)
            .map(String::as_str)
            .ok_or_else(|| SchemaError::missing_child(element, self.declared_name(), child))
    }

    fn declared_name(&self) -> Option<&str> {
        self.attributes.get("@name").map(String::as_str)
    }

    fn prop_decls(&self) -> Result<Vec<Prop>, SchemaError> {
        self.props
            .iter()
            .map(|prop| {
                let name = prop
                    .get("@name")
                    .ok_or_else(|| SchemaError::missing_attr("prop", None, "@name"))?;
                let value = prop
                    .get("@value")
                    .ok_or_else(|| SchemaError::missing_attr("prop", Some(name), "@value"))?;
                Ok(Prop {
                    name: name.clone(),
                    value: value.clone(),
                    namespace: prop.get("@namespace").cloned(),
                })
            })
            .collect()
    }

    fn constraint_decls(&self) -> Vec<ConstraintDecl> {
        self.constraints
            .iter()
            .map(|(kind, occurrences)| ConstraintDecl {
                kind: kind.clone(),
                occurrences: occurrences
                    .iter()
                    .map(|occ| ConstraintOccurrence {
                        name: occ.get("@name").cloned(),
                        target: occ.get("@target").cloned(),
                        level: occ.get("@level").cloned(),
                    })
                    .collect(),
            })
            .collect()
    }
}
