//! # Metagen
//!
//! Source module generation from metaschema definitions.
//!
//! Metagen turns a set of parsed metaschema modules (assemblies,
//! fields, flags, constraints and core datatypes) into one generated
//! source module per schema module, resolving every cross-module
//! `@ref`/`@as-type` reference to a fully qualified class name first.
//!
//! ## Quick Start
//!
//! ```
//! use metagen::prelude::*;
//!
//! let set = MetaschemaSet::new();
//! let renderer = TextRenderer::new();
//! let package = generate_package(&set, &renderer).unwrap();
//! assert_eq!(package.modules[0].module_name, "datatypes");
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Parsed metaschema model, datatypes, raw boundary
//! - [`codegen`] - Reference resolution and class generation

pub mod prelude;

/// Parsed metaschema model and datatype definitions.
pub mod schema {
    pub use metagen_schema::*;
}

/// Reference resolution and class generation.
pub mod codegen {
    pub use metagen_codegen::*;
}
