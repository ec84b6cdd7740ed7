//! Datatype class generation.
//!
//! Datatype classes are generated from the pre-built catalog, before
//! any module pass runs; no reference resolution is involved.

use crate::catalog::DatatypeRecord;
use crate::render::{Context, Render, TemplateName, Value};

/// Generator for datatype classes.
pub struct DatatypeGenerator<'a> {
    renderer: &'a dyn Render,
}

impl<'a> DatatypeGenerator<'a> {
    /// Creates a datatype generator.
    #[must_use]
    pub fn new(renderer: &'a dyn Render) -> Self {
        Self { renderer }
    }

    /// Generates one class per catalog record, in catalog order.
    #[must_use]
    pub fn generate(&self, records: &[DatatypeRecord]) -> Vec<String> {
        records
            .iter()
            .map(|record| match record {
                DatatypeRecord::Simple {
                    name,
                    description,
                    pattern,
                    parent,
                } => {
                    let mut context = Context::new();
                    context.insert("name".to_string(), name.as_str().into());
                    context.insert("description".to_string(), description.clone().into());
                    context.insert("pattern".to_string(), pattern.clone().into());
                    context.insert("parent".to_string(), parent.clone().into());
                    self.renderer
                        .render(TemplateName::ClassDatatypeSimple, &context)
                }
                DatatypeRecord::Complex {
                    name,
                    description,
                    elements,
                } => {
                    let mut context = Context::new();
                    context.insert("name".to_string(), name.as_str().into());
                    context.insert("description".to_string(), description.clone().into());
                    context.insert(
                        "elements".to_string(),
                        Value::List(elements.iter().map(|e| e.as_str().into()).collect()),
                    );
                    self.renderer
                        .render(TemplateName::ClassDatatypeComplex, &context)
                }
            })
            .collect()
    }
}
