//! End-to-end generation run

use crate::config::Paths;
use crate::module::{aggregate, ModuleDoc, VfModule};
use crate::render::{doc_file_name, write_docs};
use crate::scanner::{scan_directory, ResolverKind};
use crate::schema::SchemaCatalog;
use crate::Result;
use serde::Serialize;
use std::path::PathBuf;

/// Per-module outcome of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleReport {
    pub module: VfModule,
    pub queries: usize,
    pub queries_implemented: usize,
    pub mutations: usize,
    pub mutations_implemented: usize,
    /// Written page, `None` for modules without a page
    pub file: Option<PathBuf>,
}

/// Outcome of a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub modules: Vec<ModuleReport>,
}

impl Report {
    pub fn files_written(&self) -> usize {
        self.modules.iter().filter(|m| m.file.is_some()).count()
    }
}

/// Scan both resolver directories, then write one page per documented module
pub fn generate(paths: &Paths) -> Result<Report> {
    tracing::debug!("Loading schema from {}", paths.schema.display());
    let schema = SchemaCatalog::load(&paths.schema, &paths.extensions)?;

    let mutations = scan_directory(paths.resolver_dir(ResolverKind::Mutation), ResolverKind::Mutation, &schema)?;
    let queries = scan_directory(paths.resolver_dir(ResolverKind::Query), ResolverKind::Query, &schema)?;
    tracing::debug!(
        "Scanned {} query modules and {} mutation modules",
        queries.len(),
        mutations.len()
    );
    for (kind, scanned) in [(ResolverKind::Query, &queries), (ResolverKind::Mutation, &mutations)] {
        if scanned.is_empty() {
            tracing::warn!("No {} modules found in {}", kind, paths.resolver_dir(kind).display());
        }
    }

    let docs = aggregate(VfModule::all(), &queries, &mutations);
    let written = write_docs(&docs, &schema, &paths.output)?;

    let modules = docs
        .iter()
        .map(|doc| {
            let file = written
                .iter()
                .find(|p| p.file_name().and_then(|n| n.to_str()) == Some(doc_file_name(doc).as_str()))
                .cloned();
            module_report(doc, file)
        })
        .collect();

    Ok(Report { modules })
}

fn module_report(doc: &ModuleDoc<'_>, file: Option<PathBuf>) -> ModuleReport {
    ModuleReport {
        module: doc.module,
        queries: doc.queries.len(),
        queries_implemented: ModuleDoc::implemented(&doc.queries),
        mutations: doc.mutations.len(),
        mutations_implemented: ModuleDoc::implemented(&doc.mutations),
        file,
    }
}
