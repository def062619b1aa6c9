//! Markdown rendering of module reference pages

use crate::casing::{capital_case, param_case, pascal_case};
use crate::module::ModuleDoc;
use crate::scanner::ResolverRecord;
use crate::schema::SchemaCatalog;
use crate::Result;
use std::path::{Path, PathBuf};

/// File name of a module's reference page, e.g. `process-specification.md`
pub fn doc_file_name(doc: &ModuleDoc<'_>) -> String {
    format!("{}.md", param_case(doc.module.as_str()))
}

/// Render the reference page of one module
pub fn render_module(doc: &ModuleDoc<'_>, schema: &SchemaCatalog) -> Result<String> {
    let mut out = String::new();

    out.push_str(&format!("# {}\n\n", capital_case(doc.module.as_str())));

    out.push_str("## Classes\n\n");
    for class_name in doc.module.classes() {
        let type_name = pascal_case(class_name);
        let description = schema.type_description(&type_name)?.unwrap_or_default();
        out.push_str(&format!("### `{}`\n\n{}\n\n", type_name, description));
    }

    out.push_str("## Queries\n\n");
    render_records(&mut out, &doc.queries);

    out.push_str("## Mutations\n\n");
    render_records(&mut out, &doc.mutations);

    Ok(out)
}

fn render_records(out: &mut String, records: &[&ResolverRecord]) {
    for record in records {
        out.push_str(&format!(
            "### `{}`\n{}\n> Status: {}\n\n",
            record.name, record.description, record.implementation_status
        ));
    }
}

/// Render and write the pages of every documented module.
///
/// Existing pages are overwritten. Returns the written paths in order.
pub fn write_docs(docs: &[ModuleDoc<'_>], schema: &SchemaCatalog, output_dir: &Path) -> Result<Vec<PathBuf>> {
    if !output_dir.exists() {
        std::fs::create_dir_all(output_dir)?;
    }

    let mut written = Vec::new();
    for doc in docs.iter().filter(|d| d.module.is_documented()) {
        let path = output_dir.join(doc_file_name(doc));
        let contents = render_module(doc, schema)?;
        std::fs::write(&path, contents)?;
        tracing::info!("Wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}
