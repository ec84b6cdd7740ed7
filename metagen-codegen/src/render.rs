//! Template rendering seam.
//!
//! The generators produce context mappings; turning a context into
//! emitted source text is the renderer's job and stays opaque to the
//! pipeline. [`TextRenderer`] is the built-in registry: constructed
//! once at startup and passed by reference wherever rendering happens.

use std::collections::BTreeMap;

/// Names of the templates the pipeline renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateName {
    /// A whole generated module.
    Module,
    /// One flag class.
    ClassFlag,
    /// One field class.
    ClassField,
    /// One assembly class.
    ClassAssembly,
    /// One simple datatype class.
    ClassDatatypeSimple,
    /// One complex datatype class.
    ClassDatatypeComplex,
    /// One constraint record.
    Constraints,
}

impl TemplateName {
    /// Returns the template's registry name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::ClassFlag => "class_flag",
            Self::ClassField => "class_field",
            Self::ClassAssembly => "class_assembly",
            Self::ClassDatatypeSimple => "class_datatype_simple",
            Self::ClassDatatypeComplex => "class_datatype_complex",
            Self::Constraints => "constraints",
        }
    }
}

/// A context value. Maps and lists iterate in a fixed order so the
/// same context always renders to the same text.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value.
    Null,
    /// Text value.
    Str(String),
    /// Ordered list.
    List(Vec<Value>),
    /// String-keyed map.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Returns the contained string, if this is a text value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the contained list, if this is a list value.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<Option<String>> for Value {
    fn from(s: Option<String>) -> Self {
        s.map_or(Self::Null, Self::Str)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

/// A template context: the mapping a generator hands to the renderer.
pub type Context = BTreeMap<String, Value>;

/// The rendering seam. Implementations hold their template registry
/// read-only; rendering must be deterministic in the context.
pub trait Render {
    /// Renders one template with the given context.
    fn render(&self, template: TemplateName, context: &Context) -> String;
}

/// Built-in renderer emitting a plain declarative text form of each
/// class. Stands in for an external template engine; the pipeline only
/// depends on the [`Render`] trait.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl TextRenderer {
    /// Creates the renderer registry.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn str_of<'a>(context: &'a Context, key: &str) -> Option<&'a str> {
        context.get(key).and_then(Value::as_str)
    }

    fn list_of<'a>(context: &'a Context, key: &str) -> &'a [Value] {
        context.get(key).and_then(Value::as_list).unwrap_or(&[])
    }

    fn push_description(output: &mut String, context: &Context) {
        if let Some(description) = Self::str_of(context, "description") {
            output.push_str(&format!("  // {description}\n"));
        }
    }

    fn push_blocks(output: &mut String, context: &Context, key: &str) {
        for item in Self::list_of(context, key) {
            if let Some(code) = item.as_str() {
                for line in code.lines() {
                    output.push_str(&format!("  {line}\n"));
                }
            }
        }
    }

    fn render_module(context: &Context) -> String {
        let mut output = String::new();
        if let Some(name) = Self::str_of(context, "module_name") {
            output.push_str(&format!("module {name}\n"));
        }
        if let Some(version) = Self::str_of(context, "version") {
            output.push_str(&format!("version {version}\n"));
        }
        for import in Self::list_of(context, "imports") {
            if let Some(import) = import.as_str() {
                output.push_str(&format!("import {import}\n"));
            }
        }
        output.push('\n');
        for class in Self::list_of(context, "classes") {
            if let Some(code) = class.as_str() {
                output.push_str(code);
                output.push('\n');
            }
        }
        output
    }

    fn render_flag(context: &Context) -> String {
        let class_name = Self::str_of(context, "class_name").unwrap_or_default();
        let datatype = Self::str_of(context, "datatype").unwrap_or_default();
        let mut output = format!("flag {class_name}: {datatype}\n");
        Self::push_description(&mut output, context);
        Self::push_blocks(&mut output, context, "constraints");
        output
    }

    fn render_field(context: &Context) -> String {
        let class_name = Self::str_of(context, "class_name").unwrap_or_default();
        let datatype = Self::str_of(context, "datatype").unwrap_or_default();
        let mut output = format!("field {class_name}: {datatype}\n");
        Self::push_description(&mut output, context);
        for prop in Self::list_of(context, "properties") {
            if let Value::Map(prop) = prop {
                let name = prop.get("name").and_then(Value::as_str).unwrap_or_default();
                let value = prop.get("value").and_then(Value::as_str).unwrap_or_default();
                let ns = prop
                    .get("namespace")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                output.push_str(&format!("  prop {name} = {value} [{ns}]\n"));
            }
        }
        Self::push_blocks(&mut output, context, "inline_flags");
        Self::push_blocks(&mut output, context, "constraints");
        output
    }

    fn render_assembly(context: &Context) -> String {
        let class_name = Self::str_of(context, "class_name").unwrap_or_default();
        let mut output = format!("assembly {class_name}\n");
        if let Some(root_name) = Self::str_of(context, "root_name") {
            output.push_str(&format!("  root {root_name}\n"));
        }
        Self::push_description(&mut output, context);
        for prop in Self::list_of(context, "properties") {
            if let Value::Map(prop) = prop {
                let name = prop.get("name").and_then(Value::as_str).unwrap_or_default();
                let value = prop.get("value").and_then(Value::as_str).unwrap_or_default();
                let ns = prop
                    .get("namespace")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                output.push_str(&format!("  prop {name} = {value} [{ns}]\n"));
            }
        }
        for model_ref in Self::list_of(context, "model") {
            if let Some(target) = model_ref.as_str() {
                output.push_str(&format!("  member {target}\n"));
            }
        }
        Self::push_blocks(&mut output, context, "inline_flags");
        Self::push_blocks(&mut output, context, "constraints");
        output
    }

    fn render_datatype_simple(context: &Context) -> String {
        let name = Self::str_of(context, "name").unwrap_or_default();
        let mut output = format!("datatype {name}");
        if let Some(parent) = Self::str_of(context, "parent") {
            output.push_str(&format!(" extends {parent}"));
        }
        output.push('\n');
        Self::push_description(&mut output, context);
        if let Some(pattern) = Self::str_of(context, "pattern") {
            output.push_str(&format!("  pattern {pattern}\n"));
        }
        output
    }

    fn render_datatype_complex(context: &Context) -> String {
        let name = Self::str_of(context, "name").unwrap_or_default();
        let mut output = format!("datatype {name}\n");
        Self::push_description(&mut output, context);
        for element in Self::list_of(context, "elements") {
            if let Some(element) = element.as_str() {
                output.push_str(&format!("  element {element}\n"));
            }
        }
        output
    }

    fn render_constraint(context: &Context) -> String {
        let kind = Self::str_of(context, "type").unwrap_or_default();
        let target = Self::str_of(context, "target").unwrap_or_default();
        let level = Self::str_of(context, "level").unwrap_or_default();
        match Self::str_of(context, "name") {
            Some(name) => {
                format!("constraint {kind} '{name}' target={target} level={level}")
            }
            None => format!("constraint {kind} target={target} level={level}"),
        }
    }
}

impl Render for TextRenderer {
    fn render(&self, template: TemplateName, context: &Context) -> String {
        match template {
            TemplateName::Module => Self::render_module(context),
            TemplateName::ClassFlag => Self::render_flag(context),
            TemplateName::ClassField => Self::render_field(context),
            TemplateName::ClassAssembly => Self::render_assembly(context),
            TemplateName::ClassDatatypeSimple => Self::render_datatype_simple(context),
            TemplateName::ClassDatatypeComplex => Self::render_datatype_complex(context),
            TemplateName::Constraints => Self::render_constraint(context),
        }
    }
}
