//! Error types for class generation.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Schema model error.
    #[error("schema error: {0}")]
    Schema(#[from] metagen_schema::SchemaError),

    /// An `@as-type`/`@ref` value has no entry in the enclosing
    /// module's lookup table.
    #[error("unresolved reference '{name}' in module '{module}'")]
    UnresolvedReference {
        /// The reference that failed to resolve.
        name: String,
        /// Identifier of the module being generated.
        module: String,
    },

    /// Output destination failed the pre-flight check.
    #[error("invalid destination '{}': {reason}", .path.display())]
    DestinationInvalid {
        /// The offending path.
        path: PathBuf,
        /// Why the destination was rejected.
        reason: String,
    },

    /// IO error while writing the package.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodegenError {
    /// Creates an unresolved reference error.
    pub fn unresolved(name: impl Into<String>, module: impl Into<String>) -> Self {
        Self::UnresolvedReference {
            name: name.into(),
            module: module.into(),
        }
    }

    /// Creates a destination error.
    pub fn destination(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::DestinationInvalid {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
