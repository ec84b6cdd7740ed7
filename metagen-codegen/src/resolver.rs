//! Per-module reference resolver.
//!
//! Builds one module's lookup table from bare reference name to fully
//! qualified `module.Class` target. Three layers, lowest precedence
//! first: datatype entries, entries from explicitly imported modules
//! in import order, then the module's own top-level declarations. A
//! locally defined name always shadows anything imported.

use std::collections::BTreeMap;

use metagen_schema::Metaschema;

use crate::sanitize::sanitize;
use crate::symbols::{DATATYPE_ORIGIN, GlobalRef};

/// Mapping from a bare reference name to its fully qualified target.
/// Rebuilt per module and discarded afterwards.
pub type RefTable = BTreeMap<String, String>;

/// Builds the reference lookup table for one module.
#[must_use]
pub fn build_ref_table(metaschema: &Metaschema, global_refs: &[GlobalRef]) -> RefTable {
    let mut table = RefTable::new();

    for global_ref in global_refs {
        if global_ref.schema_source == DATATYPE_ORIGIN {
            table.insert(
                global_ref.ref_name.clone(),
                format!("{}.{}", global_ref.module_name, global_ref.class_name),
            );
        }
    }

    for import in &metaschema.imports {
        for global_ref in global_refs {
            if global_ref.schema_source == import.href {
                table.insert(
                    global_ref.ref_name.clone(),
                    format!("{}.{}", global_ref.module_name, global_ref.class_name),
                );
            }
        }
    }

    let module_name = sanitize(&metaschema.short_name);
    let mut insert_local = |name: &str, formal_name: &str| {
        table.insert(
            sanitize(name),
            format!("{}.{}", module_name, sanitize(formal_name)),
        );
    };

    for assembly in &metaschema.assemblies {
        insert_local(&assembly.name, &assembly.formal_name);
    }
    for field in &metaschema.fields {
        insert_local(&field.name, &field.formal_name);
    }
    for flag in &metaschema.flags {
        insert_local(&flag.name, &flag.formal_name);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use metagen_schema::{FieldDecl, MetaschemaSet};
    use crate::symbols::gather_references;

    fn module(file: &str, short_name: &str) -> Metaschema {
        Metaschema::new(file.to_string(), short_name.to_string(), "1.0".to_string())
    }

    fn field(name: &str, formal_name: &str) -> FieldDecl {
        FieldDecl {
            name: name.to_string(),
            formal_name: formal_name.to_string(),
            as_type: "string".to_string(),
            description: None,
            use_name: None,
            props: Vec::new(),
            flags: Vec::new(),
            constraints: Vec::new(),
        }
    }

    #[test]
    fn test_datatype_entries_seed_table() {
        let refs = vec![GlobalRef {
            schema_source: DATATYPE_ORIGIN.to_string(),
            module_name: "datatypes".to_string(),
            ref_name: "token".to_string(),
            class_name: "TokenDatatype".to_string(),
        }];

        let table = build_ref_table(&module("a.xml", "a"), &refs);
        assert_eq!(table.get("token").map(String::as_str), Some("datatypes.TokenDatatype"));
    }

    #[test]
    fn test_import_only_pulls_listed_modules() {
        let refs = vec![
            GlobalRef {
                schema_source: "a.xml".to_string(),
                module_name: "a".to_string(),
                ref_name: "foo".to_string(),
                class_name: "AType".to_string(),
            },
            GlobalRef {
                schema_source: "unrelated.xml".to_string(),
                module_name: "unrelated".to_string(),
                ref_name: "bar".to_string(),
                class_name: "BarType".to_string(),
            },
        ];

        let mut b = module("b.xml", "b");
        b.add_import("a.xml");

        let table = build_ref_table(&b, &refs);
        assert_eq!(table.get("foo").map(String::as_str), Some("a.AType"));
        assert!(!table.contains_key("bar"));
    }

    #[test]
    fn test_local_definition_shadows_import() {
        let mut a = module("a.xml", "a");
        a.add_global("foo", "AType");

        let mut b = module("b.xml", "b");
        b.add_import("a.xml");
        b.fields.push(field("foo", "BType"));

        let mut set = MetaschemaSet::new();
        set.add_metaschema(a);
        set.add_metaschema(b.clone());

        let refs = gather_references(&set);
        let table = build_ref_table(&b, &refs);
        assert_eq!(table.get("foo").map(String::as_str), Some("b.BType"));
    }

    #[test]
    fn test_later_import_wins() {
        let refs = vec![
            GlobalRef {
                schema_source: "a.xml".to_string(),
                module_name: "a".to_string(),
                ref_name: "x".to_string(),
                class_name: "X1".to_string(),
            },
            GlobalRef {
                schema_source: "d.xml".to_string(),
                module_name: "d".to_string(),
                ref_name: "x".to_string(),
                class_name: "X2".to_string(),
            },
        ];

        let mut c = module("c.xml", "c");
        c.add_import("a.xml");
        c.add_import("d.xml");
        let table = build_ref_table(&c, &refs);
        assert_eq!(table.get("x").map(String::as_str), Some("d.X2"));

        let mut c_reversed = module("c.xml", "c");
        c_reversed.add_import("d.xml");
        c_reversed.add_import("a.xml");
        let table = build_ref_table(&c_reversed, &refs);
        assert_eq!(table.get("x").map(String::as_str), Some("a.X1"));
    }

    #[test]
    fn test_local_names_are_sanitized_and_qualified() {
        let mut m = module("plan.xml", "assessment-plan");
        m.fields.push(field("local-definition", "Local Definition"));

        let table = build_ref_table(&m, &[]);
        assert_eq!(
            table.get("local_definition").map(String::as_str),
            Some("assessment_plan.LocalDefinition")
        );
    }
}
