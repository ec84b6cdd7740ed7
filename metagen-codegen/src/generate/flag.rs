//! Flag class generation.

use std::collections::BTreeSet;

use metagen_schema::FlagDecl;
use tracing::debug;

use crate::error::CodegenError;
use crate::generate::constraint::render_constraints;
use crate::generate::{GeneratedClass, resolve};
use crate::render::{Context, Render, TemplateName, Value};
use crate::resolver::RefTable;
use crate::sanitize::sanitize;

/// Generator for flag classes.
pub struct FlagGenerator<'a> {
    table: &'a RefTable,
    module: &'a str,
    renderer: &'a dyn Render,
}

impl<'a> FlagGenerator<'a> {
    /// Creates a flag generator for one module's lookup table.
    #[must_use]
    pub fn new(table: &'a RefTable, module: &'a str, renderer: &'a dyn Render) -> Self {
        Self {
            table,
            module,
            renderer,
        }
    }

    /// Generates one flag class.
    ///
    /// # Errors
    /// Returns `CodegenError::UnresolvedReference` if the flag's
    /// `@as-type` has no entry in the lookup table.
    pub fn generate(&self, flag: &FlagDecl) -> Result<GeneratedClass, CodegenError> {
        let datatype_ref = resolve(self.table, &flag.as_type, self.module)?;

        let mut context = Context::new();
        context.insert("class_name".to_string(), sanitize(&flag.formal_name).into());
        context.insert("flag_name".to_string(), flag.effective_name().into());
        context.insert("datatype".to_string(), flag.as_type.as_str().into());
        context.insert("description".to_string(), flag.description.clone().into());
        context.insert(
            "constraints".to_string(),
            Value::List(
                render_constraints(&flag.constraints, self.renderer)
                    .into_iter()
                    .map(Value::from)
                    .collect(),
            ),
        );

        debug!(module = %self.module, flag = %flag.name, "generated flag class");

        Ok(GeneratedClass {
            code: self.renderer.render(TemplateName::ClassFlag, &context),
            refs: BTreeSet::from([datatype_ref.to_string()]),
        })
    }
}
