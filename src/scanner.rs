//! Export scanner
//!
//! Walks a resolver directory, matches each module's resolver map and
//! records the implementation status of every entry.

use crate::schema::SchemaCatalog;
use crate::syntax::shape::{self, ImplementationShape};
use crate::syntax::{self, SourceLanguage};
use crate::{Error, Result};
use apollo_compiler::ast::OperationType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Base name of the module that re-exports a resolver directory
const INDEX_FILE_STEM: &str = "index";

/// Which root type a resolver directory serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolverKind {
    Query,
    Mutation,
}

impl ResolverKind {
    /// Name of the schema root type
    pub fn root_type_name(&self) -> &'static str {
        match self {
            ResolverKind::Query => "Query",
            ResolverKind::Mutation => "Mutation",
        }
    }

    pub fn operation_type(&self) -> OperationType {
        match self {
            ResolverKind::Query => OperationType::Query,
            ResolverKind::Mutation => OperationType::Mutation,
        }
    }

    /// Conventional directory name under the resolver root
    pub fn default_dir(&self) -> &'static str {
        match self {
            ResolverKind::Query => "queries",
            ResolverKind::Mutation => "mutations",
        }
    }
}

impl fmt::Display for ResolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.root_type_name())
    }
}

/// Whether a resolver does real work or is a stub
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImplementationStatus {
    Implemented,
    Unimplemented,
}

impl ImplementationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImplementationStatus::Implemented => "Implemented",
            ImplementationStatus::Unimplemented => "Unimplemented",
        }
    }

    pub fn is_implemented(&self) -> bool {
        matches!(self, ImplementationStatus::Implemented)
    }
}

impl From<ImplementationShape> for ImplementationStatus {
    fn from(shape: ImplementationShape) -> Self {
        match shape {
            ImplementationShape::FactoryCall | ImplementationShape::Function => {
                ImplementationStatus::Implemented
            }
            ImplementationShape::Missing | ImplementationShape::ThrowingStub => {
                ImplementationStatus::Unimplemented
            }
        }
    }
}

impl fmt::Display for ImplementationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolver exported by one module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverRecord {
    pub name: String,
    pub description: String,
    pub implementation_status: ImplementationStatus,
}

/// Records per module file, keyed by file base name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    files: BTreeMap<String, Vec<ResolverRecord>>,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the records of one file
    pub fn insert(&mut self, base_name: impl Into<String>, records: Vec<ResolverRecord>) {
        self.files.insert(base_name.into(), records);
    }

    /// Records of a file; empty when the file was not scanned
    pub fn records(&self, base_name: &str) -> &[ResolverRecord] {
        self.files.get(base_name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether records were stored for a file base name
    pub fn contains(&self, base_name: &str) -> bool {
        self.files.contains_key(base_name)
    }

    /// Scanned file base names, sorted
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Scan every resolver module in `dir`.
///
/// Modules without a default export are skipped. Any other deviation from
/// the expected module shape aborts the scan.
pub fn scan_directory(dir: &Path, kind: ResolverKind, schema: &SchemaCatalog) -> Result<ScanResult> {
    let mut result = ScanResult::new();

    let mut entries: Vec<_> = std::fs::read_dir(dir)?.collect::<std::io::Result<_>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        if !entry.file_type()?.is_file() {
            continue;
        }
        let Some(language) = SourceLanguage::for_path(&path) else {
            tracing::debug!("Skipping non-source file {}", path.display());
            continue;
        };
        let Some(base_name) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if base_name == INDEX_FILE_STEM {
            continue;
        }

        let content = std::fs::read_to_string(&path)?;
        match scan_source(&path, language, &content, kind, schema)? {
            Some(records) => {
                // `agent.ts` and `agent.js` would both land under `agent`
                if result.contains(base_name) {
                    return Err(Error::DuplicateModule {
                        base_name: base_name.to_string(),
                        path,
                    });
                }
                tracing::debug!("{} {}: {} resolvers", kind, base_name, records.len());
                result.insert(base_name, records);
            }
            None => tracing::debug!("No default export in {}", path.display()),
        }
    }

    Ok(result)
}

/// Scan one module's source text.
///
/// Returns `Ok(None)` when the module has no default export.
pub fn scan_source(
    path: &Path,
    language: SourceLanguage,
    content: &str,
    kind: ResolverKind,
    schema: &SchemaCatalog,
) -> Result<Option<Vec<ResolverRecord>>> {
    let tree = syntax::parse(language, content)?;
    let root = tree.root_node();
    if root.has_error() {
        tracing::warn!("{} contains syntax errors, scanning anyway", path.display());
    }

    let shape_error = |source: shape::ShapeError| Error::Shape { path: path.to_path_buf(), source };

    let Some(map) = shape::resolver_map(root, content.as_bytes()).map_err(shape_error)? else {
        return Ok(None);
    };

    let mut records = Vec::with_capacity(map.entries.len());
    for entry in map.entries {
        let shape = shape::implementation_shape(&entry.name, entry.implementation)
            .map_err(shape_error)?;
        tracing::trace!("{}:{} {} is {:?}", path.display(), entry.line, entry.name, shape);

        let description = schema
            .field_description(kind, &entry.name)
            .unwrap_or_default()
            .to_string();

        records.push(ResolverRecord {
            name: entry.name,
            description,
            implementation_status: shape.into(),
        });
    }

    Ok(Some(records))
}
