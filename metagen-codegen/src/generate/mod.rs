//! Class generation drivers.

pub mod assembly;
pub mod constraint;
pub mod datatype;
pub mod field;
pub mod flag;

pub use assembly::AssemblyGenerator;
pub use datatype::DatatypeGenerator;
pub use field::FieldGenerator;
pub use flag::FlagGenerator;

use std::collections::BTreeSet;

use crate::error::CodegenError;
use crate::resolver::RefTable;
use crate::sanitize::sanitize;

/// Namespace applied to a `prop` that does not declare one.
pub const METASCHEMA_NS: &str = "http://csrc.nist.gov/ns/oscal/metaschema/1.0";

/// One generated class: its source text plus the fully qualified
/// identifiers it references. The references feed the enclosing
/// module's import set.
#[derive(Debug, Clone)]
pub struct GeneratedClass {
    /// Rendered class source.
    pub code: String,
    /// Fully qualified identifiers this class depends on.
    pub refs: BTreeSet<String>,
}

/// Resolves a reference name through a module's lookup table.
///
/// The name is sanitized the same way table keys were; the error
/// carries the raw name as written in the schema.
pub(crate) fn resolve<'t>(
    table: &'t RefTable,
    name: &str,
    module: &str,
) -> Result<&'t str, CodegenError> {
    table
        .get(&sanitize(name))
        .map(String::as_str)
        .ok_or_else(|| CodegenError::unresolved(name, module))
}
