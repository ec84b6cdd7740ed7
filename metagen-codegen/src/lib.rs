//! # Metagen Codegen
//!
//! Class generation from parsed metaschema modules.
//!
//! This crate provides:
//! - Identifier sanitization for generated names
//! - The datatype catalog and global symbol table builders
//! - Per-module reference resolution with local-over-import shadowing
//! - Flag, field, assembly, constraint and datatype class generators
//! - Package assembly and output writing

pub mod catalog;
pub mod error;
pub mod generate;
pub mod module;
pub mod package;
pub mod render;
pub mod resolver;
pub mod sanitize;
pub mod symbols;

pub use catalog::{DatatypeRecord, build_catalog};
pub use error::CodegenError;
pub use generate::GeneratedClass;
pub use module::{GeneratedModule, ModuleGenerator};
pub use package::{Package, PackageGenerator, generate_package};
pub use render::{Context, Render, TemplateName, TextRenderer, Value};
pub use resolver::{RefTable, build_ref_table};
pub use sanitize::sanitize;
pub use symbols::{GlobalRef, gather_references};
