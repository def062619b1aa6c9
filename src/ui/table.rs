use crate::generate::{ModuleReport, Report};
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
pub struct ModuleRow {
    #[tabled(rename = "Module")]
    pub module: String,
    #[tabled(rename = "Queries")]
    pub queries: String,
    #[tabled(rename = "Mutations")]
    pub mutations: String,
    #[tabled(rename = "Page")]
    pub page: String,
}

impl From<&ModuleReport> for ModuleRow {
    fn from(report: &ModuleReport) -> Self {
        Self {
            module: report.module.to_string(),
            queries: format!("{}/{}", report.queries_implemented, report.queries),
            mutations: format!("{}/{}", report.mutations_implemented, report.mutations),
            page: report
                .file
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

pub struct TableBuilder {
    rows: Vec<ModuleRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, row: ModuleRow) {
        self.rows.push(row);
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Implemented/total counts per module
pub fn summary_table(report: &Report) -> String {
    let mut builder = TableBuilder::new();
    for module in &report.modules {
        builder.add_row(module.into());
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::VfModule;
    use std::path::PathBuf;

    #[test]
    fn test_summary_table() {
        let report = Report {
            modules: vec![
                ModuleReport {
                    module: VfModule::Agent,
                    queries: 4,
                    queries_implemented: 3,
                    mutations: 2,
                    mutations_implemented: 0,
                    file: Some(PathBuf::from("docs/agent.md")),
                },
                ModuleReport {
                    module: VfModule::Util,
                    queries: 0,
                    queries_implemented: 0,
                    mutations: 0,
                    mutations_implemented: 0,
                    file: None,
                },
            ],
        };

        let table = summary_table(&report);
        let agent_line = table.lines().find(|l| l.contains("agent")).expect("agent row");
        assert!(agent_line.contains("3/4"));
        assert!(agent_line.contains("0/2"));
        assert!(agent_line.contains("agent.md"));
        let util_line = table.lines().find(|l| l.contains("util")).expect("util row");
        assert!(util_line.contains('-'));
    }

    #[test]
    fn test_empty_report() {
        assert!(summary_table(&Report::default()).is_empty());
    }
}
