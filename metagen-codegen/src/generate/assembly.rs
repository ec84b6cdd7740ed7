//! Assembly class generation.

use std::collections::BTreeMap;

use metagen_schema::AssemblyDecl;
use tracing::debug;

use crate::error::CodegenError;
use crate::generate::constraint::render_constraints;
use crate::generate::flag::FlagGenerator;
use crate::generate::{GeneratedClass, METASCHEMA_NS, resolve};
use crate::render::{Context, Render, TemplateName, Value};
use crate::resolver::RefTable;
use crate::sanitize::sanitize;

/// Generator for assembly classes.
pub struct AssemblyGenerator<'a> {
    table: &'a RefTable,
    module: &'a str,
    renderer: &'a dyn Render,
}

impl<'a> AssemblyGenerator<'a> {
    /// Creates an assembly generator for one module's lookup table.
    #[must_use]
    pub fn new(table: &'a RefTable, module: &'a str, renderer: &'a dyn Render) -> Self {
        Self {
            table,
            module,
            renderer,
        }
    }

    /// Generates one assembly class.
    ///
    /// Every model child's `@ref` is resolved through the lookup
    /// table; the resolved targets and any inline flags' datatypes all
    /// land in the dependency set.
    ///
    /// # Errors
    /// Returns `CodegenError::UnresolvedReference` if a model `@ref`
    /// or an inline flag's `@as-type` has no entry in the table.
    pub fn generate(&self, assembly: &AssemblyDecl) -> Result<GeneratedClass, CodegenError> {
        let mut refs = std::collections::BTreeSet::new();

        let mut model = Vec::new();
        for model_ref in &assembly.model_refs {
            let target = resolve(self.table, model_ref, self.module)?;
            model.push(Value::Str(target.to_string()));
            refs.insert(target.to_string());
        }

        let flag_generator = FlagGenerator::new(self.table, self.module, self.renderer);
        let mut inline_flags = Vec::new();
        for flag in &assembly.flags {
            let generated = flag_generator.generate(flag)?;
            inline_flags.push(Value::Str(generated.code));
            refs.extend(generated.refs);
        }

        let props: Vec<Value> = assembly
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

        let mut context = Context::new();
        context.insert(
            "class_name".to_string(),
            sanitize(&assembly.formal_name).into(),
        );
        context.insert("assembly_name".to_string(), assembly.effective_name().into());
        context.insert("description".to_string(), assembly.description.clone().into());
        context.insert("root_name".to_string(), assembly.root_name.clone().into());
        context.insert("properties".to_string(), Value::List(props));
        context.insert("model".to_string(), Value::List(model));
        context.insert("inline_flags".to_string(), Value::List(inline_flags));
        context.insert(
            "constraints".to_string(),
            Value::List(
                render_constraints(&assembly.constraints, self.renderer)
                    .into_iter()
                    .map(Value::from)
                    .collect(),
            ),
        );

        debug!(module = %self.module, assembly = %assembly.name, "generated assembly class");

        Ok(GeneratedClass {
            code: self.renderer.render(TemplateName::ClassAssembly, &context),
            refs,
        })
    }
}
