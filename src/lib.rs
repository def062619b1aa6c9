//! # vfdocs - ValueFlows resolver reference docs
//!
//! Generates the GraphQL API reference pages for a ValueFlows implementation.
//!
//! vfdocs provides:
//! - Tree-sitter based parsing of TypeScript/JavaScript resolver modules
//! - Implementation status inference from resolver body shapes
//! - Schema-backed descriptions for root fields and types
//! - One markdown page per ValueFlows module

pub mod casing;
pub mod config;
pub mod generate;
pub mod module;
pub mod render;
pub mod scanner;
pub mod schema;
pub mod syntax;
pub mod ui;

// Re-exports for convenient access
pub use generate::{generate, Report};
pub use module::{ModuleDoc, VfModule};
pub use scanner::{ImplementationStatus, ResolverKind, ResolverRecord, ScanResult};
pub use schema::SchemaCatalog;
pub use syntax::shape::ShapeError;

use std::path::PathBuf;

/// Result type alias for vfdocs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for vfdocs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unexpected resolver shape in {}: {source}", .path.display())]
    Shape {
        path: PathBuf,
        #[source]
        source: ShapeError,
    },

    #[error("Resolver module `{base_name}` is defined more than once ({})", .path.display())]
    DuplicateModule { base_name: String, path: PathBuf },

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Type not found in schema: {0}")]
    UnknownType(String),

    #[error("Config error: {0}")]
    Config(String),
}
