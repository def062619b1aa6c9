//! Schema catalog
//!
//! Builds the ValueFlows schema from its SDL module files plus extension
//! files and answers description lookups for the renderer and the scanner.

use crate::scanner::ResolverKind;
use crate::{Error, Result};
use apollo_compiler::ast::{self, Definition, Document};
use apollo_compiler::schema::ExtendedType;
use apollo_compiler::{Node, Schema};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// File extensions holding SDL
const SDL_EXTENSIONS: &[&str] = &["gql", "graphql"];

/// Read-only view of the built schema
#[derive(Debug)]
pub struct SchemaCatalog {
    schema: Schema,
}

impl SchemaCatalog {
    /// Load every SDL file under `schema_dir`, then each extension file in order
    pub fn load(schema_dir: &Path, extensions: &[PathBuf]) -> Result<Self> {
        if !schema_dir.is_dir() {
            return Err(Error::Schema(format!(
                "schema directory {} does not exist",
                schema_dir.display()
            )));
        }

        let mut paths: Vec<PathBuf> = walkdir::WalkDir::new(schema_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| {
                p.extension()
                    .and_then(|s| s.to_str())
                    .is_some_and(|ext| SDL_EXTENSIONS.contains(&ext))
            })
            .collect();
        paths.extend(extensions.iter().cloned());

        let mut sources = Vec::with_capacity(paths.len());
        for path in paths {
            let sdl = std::fs::read_to_string(&path).map_err(|e| {
                Error::Schema(format!("failed to read {}: {}", path.display(), e))
            })?;
            tracing::debug!("Loaded schema source {}", path.display());
            sources.push((sdl, path));
        }

        Self::from_sources(sources)
    }

    /// Build a catalog from `(sdl, path)` pairs, in order.
    ///
    /// A repeated `type X` definition is folded into the first one as an
    /// extension, which is how the ValueFlows modules each contribute to
    /// `Query` and `Mutation`.
    pub fn from_sources<I, P>(sources: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, P)>,
        P: AsRef<Path>,
    {
        let mut builder = Schema::builder().adopt_orphan_extensions();
        let mut defined_objects: HashSet<String> = HashSet::new();

        for (sdl, path) in sources {
            let path = path.as_ref();
            let mut document = Document::parse(sdl, path)
                .map_err(|e| Error::Schema(format!("{}: {}", path.display(), e.errors)))?;
            merge_repeated_objects(&mut document, &mut defined_objects);
            builder = builder.add_ast(&document);
        }

        let schema = match builder.build() {
            Ok(schema) => schema,
            Err(with_errors) => {
                tracing::warn!("Schema built with diagnostics:\n{}", with_errors.errors);
                with_errors.partial
            }
        };

        Ok(Self { schema })
    }

    /// Description of a root field (`Query.<field>` / `Mutation.<field>`)
    pub fn field_description(&self, kind: ResolverKind, field: &str) -> Option<&str> {
        let root = self
            .schema
            .root_operation(kind.operation_type())
            .map(|name| name.as_str())
            .unwrap_or(kind.root_type_name());

        self.schema
            .get_object(root)?
            .fields
            .get(field)?
            .description
            .as_deref()
    }

    /// Description of a named type; `None` if the type carries none
    pub fn type_description(&self, type_name: &str) -> Result<Option<&str>> {
        let ty = self
            .schema
            .types
            .get(type_name)
            .ok_or_else(|| Error::UnknownType(type_name.to_string()))?;

        let description = match ty {
            ExtendedType::Scalar(t) => t.description.as_deref(),
            ExtendedType::Object(t) => t.description.as_deref(),
            ExtendedType::Interface(t) => t.description.as_deref(),
            ExtendedType::Union(t) => t.description.as_deref(),
            ExtendedType::Enum(t) => t.description.as_deref(),
            ExtendedType::InputObject(t) => t.description.as_deref(),
        };
        Ok(description)
    }
}

/// Rewrite object type definitions already seen into extensions
fn merge_repeated_objects(document: &mut Document, defined: &mut HashSet<String>) {
    for definition in document.definitions.iter_mut() {
        let Definition::ObjectTypeDefinition(object) = definition else {
            continue;
        };
        if defined.insert(object.name.to_string()) {
            continue;
        }

        tracing::debug!("Merging repeated definition of {} as an extension", object.name);
        let extension = ast::ObjectTypeExtension {
            name: object.name.clone(),
            implements_interfaces: object.implements_interfaces.clone(),
            directives: object.directives.clone(),
            fields: object.fields.clone(),
        };
        *definition = Definition::ObjectTypeExtension(Node::new(extension));
    }
}
