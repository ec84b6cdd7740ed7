//! Global symbol table builder.
//!
//! Scans every module's exported globals plus the datatype catalog
//! into a flat list of reference entries. This list is the single
//! source of truth for cross-module references: it is built once,
//! before any module resolution starts, and only read afterwards.

use std::collections::HashSet;

use metagen_schema::MetaschemaSet;
use tracing::warn;

use crate::sanitize::sanitize;

/// Origin key used for datatype entries, which live in the metaschema
/// definition itself rather than in any one module.
pub const DATATYPE_ORIGIN: &str = "datatype";

/// Module identifier of the generated datatype module.
pub const DATATYPE_MODULE: &str = "datatypes";

/// A resolved mapping from one exportable name to where it lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalRef {
    /// Origin: the defining module's file identity, or [`DATATYPE_ORIGIN`].
    pub schema_source: String,
    /// Identifier of the generated module containing the target.
    pub module_name: String,
    /// The name other modules use in `@ref`/`@as-type`.
    pub ref_name: String,
    /// The generated class name the reference resolves to.
    pub class_name: String,
}

/// Builds the global symbol table for a metaschema set.
///
/// Emission order is module order, then within-module declaration
/// order, then datatype order; order has no effect on resolution but
/// keeps output reproducible. A name exported twice from one module is
/// accepted last-wins, with a warning.
#[must_use]
pub fn gather_references(set: &MetaschemaSet) -> Vec<GlobalRef> {
    let mut refs = Vec::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();

    for metaschema in &set.metaschemas {
        let module_name = sanitize(&metaschema.short_name);
        for global in &metaschema.globals {
            let ref_name = sanitize(&global.name);
            if !seen.insert((metaschema.file.clone(), ref_name.clone())) {
                warn!(
                    module = %module_name,
                    name = %ref_name,
                    "duplicate exported name, last declaration wins"
                );
            }
            refs.push(GlobalRef {
                schema_source: metaschema.file.clone(),
                module_name: module_name.clone(),
                ref_name,
                class_name: sanitize(&global.target),
            });
        }
    }

    for datatype in &set.datatypes {
        if let Some(ref_name) = datatype.ref_name() {
            refs.push(GlobalRef {
                schema_source: DATATYPE_ORIGIN.to_string(),
                module_name: DATATYPE_MODULE.to_string(),
                ref_name: sanitize(ref_name),
                class_name: sanitize(datatype.name()),
            });
        }
    }

    refs
}
