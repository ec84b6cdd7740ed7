//! Prelude module for convenient imports.
//!
//! ```
//! use metagen::prelude::*;
//! ```

// Schema model types
pub use metagen_schema::{
    AssemblyDecl, ComplexDataType, DataType, FieldDecl, FlagDecl, Metaschema, MetaschemaSet,
    RawDeclaration, SchemaError, SimpleDataType,
};

// Codegen types
pub use metagen_codegen::{
    CodegenError, GeneratedClass, GeneratedModule, Package, PackageGenerator, Render, RefTable,
    TemplateName, TextRenderer, build_catalog, build_ref_table, gather_references,
    generate_package, sanitize,
};
