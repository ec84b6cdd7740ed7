//! Field class generation.

use std::collections::BTreeMap;

use metagen_schema::FieldDecl;
use tracing::debug;

use crate::error::CodegenError;
use crate::generate::constraint::render_constraints;
use crate::generate::flag::FlagGenerator;
use crate::generate::{GeneratedClass, METASCHEMA_NS, resolve};
use crate::render::{Context, Render, TemplateName, Value};
use crate::resolver::RefTable;
use crate::sanitize::sanitize;

/// Generator for field classes.
pub struct FieldGenerator<'a> {
    table: &'a RefTable,
    module: &'a str,
    renderer: &'a dyn Render,
}

impl<'a> FieldGenerator<'a> {
    /// Creates a field generator for one module's lookup table.
    #[must_use]
    pub fn new(table: &'a RefTable, module: &'a str, renderer: &'a dyn Render) -> Self {
        Self {
            table,
            module,
            renderer,
        }
    }

    /// Generates one field class, including its inline flags.
    ///
    /// Inline flags share the module's lookup table and are not
    /// separately exported; their datatype references are folded into
    /// the field's dependency set.
    ///
    /// # Errors
    /// Returns `CodegenError::UnresolvedReference` if the field's
    /// `@as-type`, or any inline flag's, has no entry in the table.
    pub fn generate(&self, field: &FieldDecl) -> Result<GeneratedClass, CodegenError> {
        let datatype_ref = resolve(self.table, &field.as_type, self.module)?.to_string();

        let props: Vec<Value> = field
            .props
            .iter()
            .map(|prop| {
                let mut map = BTreeMap::new();
                map.insert("name".to_string(), Value::Str(prop.name.clone()));
                map.insert("value".to_string(), Value::Str(prop.value.clone()));
                map.insert(
                    "namespace".to_string(),
                    Value::Str(
                        prop.namespace
                            .clone()
                            .unwrap_or_else(|| METASCHEMA_NS.to_string()),
                    ),
                );
                Value::Map(map)
            })
            .collect();

        let flag_generator = FlagGenerator::new(self.table, self.module, self.renderer);
        let mut refs = std::collections::BTreeSet::from([datatype_ref]);
        let mut inline_flags = Vec::new();
        for flag in &field.flags {
            let generated = flag_generator.generate(flag)?;
            inline_flags.push(Value::Str(generated.code));
            refs.extend(generated.refs);
        }

        let mut context = Context::new();
        context.insert(
            "class_name".to_string(),
            sanitize(&field.formal_name).into(),
        );
        context.insert("field_name".to_string(), field.effective_name().into());
        context.insert("datatype".to_string(), field.as_type.as_str().into());
        context.insert("description".to_string(), field.description.clone().into());
        context.insert("properties".to_string(), Value::List(props));
        context.insert("inline_flags".to_string(), Value::List(inline_flags));
        context.insert(
            "constraints".to_string(),
            Value::List(
                render_constraints(&field.constraints, self.renderer)
                    .into_iter()
                    .map(Value::from)
                    .collect(),
            ),
        );

        debug!(module = %self.module, field = %field.name, "generated field class");

        Ok(GeneratedClass {
            code: self.renderer.render(TemplateName::ClassField, &context),
            refs,
        })
    }
}
