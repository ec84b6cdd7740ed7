//! Per-module generation.
//!
//! Runs the class generators over one module's top-level declarations
//! and renders the module source, with an import list aggregated from
//! the classes' dependency sets.

use std::collections::BTreeSet;

use metagen_schema::Metaschema;
use tracing::info;

use crate::catalog::DatatypeRecord;
use crate::error::CodegenError;
use crate::generate::{AssemblyGenerator, DatatypeGenerator, FieldGenerator, FlagGenerator};
use crate::render::{Context, Render, TemplateName, Value};
use crate::resolver::build_ref_table;
use crate::sanitize::sanitize;
use crate::symbols::{DATATYPE_MODULE, GlobalRef};

/// One generated module: its identifier and rendered source.
#[derive(Debug, Clone)]
pub struct GeneratedModule {
    /// Module identifier (sanitized short name).
    pub module_name: String,
    /// Rendered module source.
    pub source: String,
}

/// Generator for one metaschema module.
pub struct ModuleGenerator<'a> {
    metaschema: &'a Metaschema,
    global_refs: &'a [GlobalRef],
}

impl<'a> ModuleGenerator<'a> {
    /// Creates a module generator.
    #[must_use]
    pub fn new(metaschema: &'a Metaschema, global_refs: &'a [GlobalRef]) -> Self {
        Self {
            metaschema,
            global_refs,
        }
    }

    /// Generates the module: builds the lookup table, runs the flag,
    /// field and assembly generators in declaration-group order, and
    /// renders the module with its aggregated imports.
    ///
    /// # Errors
    /// Returns `CodegenError` if any declaration fails to resolve.
    pub fn generate(&self, renderer: &dyn Render) -> Result<GeneratedModule, CodegenError> {
        let module_name = sanitize(&self.metaschema.short_name);
        let table = build_ref_table(self.metaschema, self.global_refs);

        let mut classes = Vec::new();
        let mut refs: BTreeSet<String> = BTreeSet::new();

        let flag_generator = FlagGenerator::new(&table, &module_name, renderer);
        for flag in &self.metaschema.flags {
            let generated = flag_generator.generate(flag)?;
            classes.push(generated.code);
            refs.extend(generated.refs);
        }

        let field_generator = FieldGenerator::new(&table, &module_name, renderer);
        for field in &self.metaschema.fields {
            let generated = field_generator.generate(field)?;
            classes.push(generated.code);
            refs.extend(generated.refs);
        }

        let assembly_generator = AssemblyGenerator::new(&table, &module_name, renderer);
        for assembly in &self.metaschema.assemblies {
            let generated = assembly_generator.generate(assembly)?;
            classes.push(generated.code);
            refs.extend(generated.refs);
        }

        // References into the module itself need no import statement.
        let own_prefix = format!("{module_name}.");
        let imports: Vec<Value> = refs
            .iter()
            .filter(|r| !r.starts_with(&own_prefix))
            .map(|r| r.as_str().into())
            .collect();

        let mut context = Context::new();
        context.insert("module_name".to_string(), module_name.as_str().into());
        context.insert(
            "version".to_string(),
            self.metaschema.schema_version.as_str().into(),
        );
        context.insert("imports".to_string(), Value::List(imports));
        context.insert(
            "classes".to_string(),
            Value::List(classes.into_iter().map(Value::from).collect()),
        );

        info!(module = %module_name, "generated module");

        Ok(GeneratedModule {
            module_name,
            source: renderer.render(TemplateName::Module, &context),
        })
    }
}

/// Generates the datatype module from the pre-built catalog.
#[must_use]
pub fn generate_datatype_module(
    records: &[DatatypeRecord],
    renderer: &dyn Render,
) -> GeneratedModule {
    let classes = DatatypeGenerator::new(renderer).generate(records);

    let mut context = Context::new();
    context.insert("module_name".to_string(), DATATYPE_MODULE.into());
    context.insert("imports".to_string(), Value::List(Vec::new()));
    context.insert(
        "classes".to_string(),
        Value::List(classes.into_iter().map(Value::from).collect()),
    );

    info!(module = DATATYPE_MODULE, "generated datatype module");

    GeneratedModule {
        module_name: DATATYPE_MODULE.to_string(),
        source: renderer.render(TemplateName::Module, &context),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::TextRenderer;
    use crate::symbols::gather_references;
    use metagen_schema::{DataType, FieldDecl, MetaschemaSet, SimpleDataType};

    fn test_set() -> MetaschemaSet {
        let mut set = MetaschemaSet::new();
        set.add_datatype(DataType::Simple(SimpleDataType::new(
            "StringDatatype".to_string(),
            Some("string".to_string()),
            "xs:string".to_string(),
        )));

        let mut common = Metaschema::new(
            "common.xml".to_string(),
            "common".to_string(),
            "1.0".to_string(),
        );
        common.add_global("remarks", "Remarks");
        common.fields.push(FieldDecl {
            name: "remarks".to_string(),
            formal_name: "Remarks".to_string(),
            as_type: "string".to_string(),
            description: None,
            use_name: None,
            props: Vec::new(),
            flags: Vec::new(),
            constraints: Vec::new(),
        });
        set.add_metaschema(common);
        set
    }

    #[test]
    fn test_generate_module_imports_datatypes() {
        let set = test_set();
        let refs = gather_references(&set);
        let renderer = TextRenderer::new();

        let module = ModuleGenerator::new(&set.metaschemas[0], &refs)
            .generate(&renderer)
            .expect("generates");

        assert_eq!(module.module_name, "common");
        assert!(module.source.contains("import datatypes.StringDatatype"));
        assert!(module.source.contains("field Remarks"));
    }

    #[test]
    fn test_self_references_not_imported() {
        let mut set = test_set();
        // A second field referencing the first by its local name.
        let common = &mut set.metaschemas[0];
        common.fields.push(FieldDecl {
            name: "note".to_string(),
            formal_name: "Note".to_string(),
            as_type: "remarks".to_string(),
            description: None,
            use_name: None,
            props: Vec::new(),
            flags: Vec::new(),
            constraints: Vec::new(),
        });

        let refs = gather_references(&set);
        let renderer = TextRenderer::new();
        let module = ModuleGenerator::new(&set.metaschemas[0], &refs)
            .generate(&renderer)
            .expect("generates");

        assert!(!module.source.contains("import common.Remarks"));
    }

    #[test]
    fn test_unresolved_reference_aborts_module() {
        let mut set = test_set();
        set.metaschemas[0].fields[0].as_type = "nonexistent".to_string();

        let refs = gather_references(&set);
        let renderer = TextRenderer::new();
        let result = ModuleGenerator::new(&set.metaschemas[0], &refs).generate(&renderer);

        let err = result.expect_err("unresolved");
        assert!(err.to_string().contains("'nonexistent'"));
        assert!(err.to_string().contains("'common'"));
    }

    #[test]
    fn test_generate_datatype_module() {
        let set = test_set();
        let catalog = crate::catalog::build_catalog(&set.datatypes);
        let renderer = TextRenderer::new();

        let module = generate_datatype_module(&catalog, &renderer);
        assert_eq!(module.module_name, "datatypes");
        assert!(module.source.contains("datatype StringDatatype"));
    }

    #[test]
    fn test_generation_is_idempotent() {
        let set = test_set();
        let refs = gather_references(&set);
        let renderer = TextRenderer::new();

        let first = ModuleGenerator::new(&set.metaschemas[0], &refs)
            .generate(&renderer)
            .expect("generates");
        let second = ModuleGenerator::new(&set.metaschemas[0], &refs)
            .generate(&renderer)
            .expect("generates");

        assert_eq!(first.source, second.source);
    }
}
