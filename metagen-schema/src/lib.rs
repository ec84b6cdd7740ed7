//! # Metagen Schema
//!
//! Parsed metaschema model and datatype definitions.
//!
//! This crate provides:
//! - The typed model of a parsed metaschema module set
//! - Core datatype descriptors (simple restrictions and complex types)
//! - The raw-declaration boundary where required attributes are
//!   validated once
//! - Model error types

pub mod datatypes;
pub mod error;
pub mod model;
pub mod raw;

pub use datatypes::{ComplexDataType, DataType, SimpleDataType};
pub use error::SchemaError;
pub use model::{
    AssemblyDecl, ConstraintDecl, ConstraintOccurrence, FieldDecl, FlagDecl, GlobalDecl,
    ImportDecl, Metaschema, MetaschemaSet, Prop,
};
pub use raw::RawDeclaration;
