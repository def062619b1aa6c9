//! ValueFlows modules
//!
//! Each module of the ValueFlows schema owns a set of classes. Class names
//! are spelled the way the resolver files are named, so the same table
//! drives both the aggregation of scanned resolvers and the class listing
//! of the rendered docs.

use crate::scanner::{ResolverRecord, ScanResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A module of the ValueFlows schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VfModule {
    Action,
    ProcessSpecification,
    ResourceSpecification,
    Measurement,
    Agent,
    Agreement,
    Observation,
    Process,
    Proposal,
    Plan,
    Fulfillment,
    Intent,
    Commitment,
    Satisfaction,
    Util,
    Pagination,
}

impl VfModule {
    /// Module identifier, underscore cased
    pub fn as_str(&self) -> &'static str {
        match self {
            VfModule::Action => "action",
            VfModule::ProcessSpecification => "process_specification",
            VfModule::ResourceSpecification => "resource_specification",
            VfModule::Measurement => "measurement",
            VfModule::Agent => "agent",
            VfModule::Agreement => "agreement",
            VfModule::Observation => "observation",
            VfModule::Process => "process",
            VfModule::Proposal => "proposal",
            VfModule::Plan => "plan",
            VfModule::Fulfillment => "fulfillment",
            VfModule::Intent => "intent",
            VfModule::Commitment => "commitment",
            VfModule::Satisfaction => "satisfaction",
            VfModule::Util => "util",
            VfModule::Pagination => "pagination",
        }
    }

    /// All modules, in documentation order
    pub fn all() -> &'static [VfModule] {
        &[
            VfModule::Action,
            VfModule::ProcessSpecification,
            VfModule::ResourceSpecification,
            VfModule::Measurement,
            VfModule::Agent,
            VfModule::Agreement,
            VfModule::Observation,
            VfModule::Process,
            VfModule::Proposal,
            VfModule::Plan,
            VfModule::Fulfillment,
            VfModule::Intent,
            VfModule::Commitment,
            VfModule::Satisfaction,
            VfModule::Util,
            VfModule::Pagination,
        ]
    }

    /// Classes enabled by this module, cased like the resolver file names
    pub fn classes(&self) -> &'static [&'static str] {
        match self {
            VfModule::Action => &["action"],
            VfModule::ProcessSpecification => &["processSpecification"],
            VfModule::ResourceSpecification => &["resourceSpecification"],
            VfModule::Measurement => &["unit"],
            VfModule::Agent => &["agent"],
            VfModule::Agreement => &["agreement"],
            VfModule::Observation => &["economicEvent", "economicResource"],
            VfModule::Process => &["process"],
            // `proposedTo` also requires `agent`
            VfModule::Proposal => &["proposal", "proposedIntent", "proposedTo"],
            VfModule::Plan => &["plan"],
            VfModule::Fulfillment => &["fulfillment"],
            VfModule::Intent => &["intent"],
            VfModule::Commitment => &["commitment"],
            VfModule::Satisfaction => &["satisfaction"],
            VfModule::Util => &[],
            VfModule::Pagination => &[],
        }
    }

    /// Whether the module gets a reference page
    pub fn is_documented(&self) -> bool {
        !matches!(self, VfModule::Util | VfModule::Pagination)
    }
}

impl fmt::Display for VfModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Queries and mutations belonging to one module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleDoc<'a> {
    pub module: VfModule,
    pub queries: Vec<&'a ResolverRecord>,
    pub mutations: Vec<&'a ResolverRecord>,
}

impl ModuleDoc<'_> {
    /// Count of implemented records in a list
    pub fn implemented(records: &[&ResolverRecord]) -> usize {
        records
            .iter()
            .filter(|r| r.implementation_status.is_implemented())
            .count()
    }
}

/// Concatenate the records of the given files, in order
pub fn collect_records<'a>(class_names: &[&str], scan: &'a ScanResult) -> Vec<&'a ResolverRecord> {
    class_names
        .iter()
        .flat_map(|name| scan.records(name))
        .collect()
}

/// Group scanned resolvers by module
pub fn aggregate<'a>(
    modules: &[VfModule],
    queries: &'a ScanResult,
    mutations: &'a ScanResult,
) -> Vec<ModuleDoc<'a>> {
    modules
        .iter()
        .map(|module| ModuleDoc {
            module: *module,
            queries: collect_records(module.classes(), queries),
            mutations: collect_records(module.classes(), mutations),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::ImplementationStatus;

    fn record(name: &str, status: ImplementationStatus) -> ResolverRecord {
        ResolverRecord {
            name: name.to_string(),
            description: String::new(),
            implementation_status: status,
        }
    }

    #[test]
    fn test_missing_file_contributes_nothing() {
        let mut queries = ScanResult::new();
        queries.insert(
            "economicEvent",
            vec![
                record("economicEvent", ImplementationStatus::Implemented),
                record("economicEvents", ImplementationStatus::Unimplemented),
            ],
        );
        let mutations = ScanResult::new();

        let docs = aggregate(&[VfModule::Observation], &queries, &mutations);

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].module, VfModule::Observation);
        assert_eq!(
            docs[0].queries,
            queries.records("economicEvent").iter().collect::<Vec<_>>()
        );
        assert!(docs[0].mutations.is_empty());
    }

    #[test]
    fn test_concatenates_in_table_order_without_dedup() {
        let mut mutations = ScanResult::new();
        mutations.insert("proposedTo", vec![record("proposeTo", ImplementationStatus::Implemented)]);
        mutations.insert(
            "proposal",
            vec![
                record("createProposal", ImplementationStatus::Implemented),
                record("proposeTo", ImplementationStatus::Unimplemented),
            ],
        );
        let queries = ScanResult::new();

        let docs = aggregate(&[VfModule::Proposal], &queries, &mutations);
        let names: Vec<_> = docs[0].mutations.iter().map(|r| r.name.as_str()).collect();

        assert_eq!(names, vec!["createProposal", "proposeTo", "proposeTo"]);
        assert_eq!(ModuleDoc::implemented(&docs[0].mutations), 2);
    }

    #[test]
    fn test_aggregate_is_per_module_concatenation() {
        let mut queries = ScanResult::new();
        queries.insert("economicEvent", vec![record("a", ImplementationStatus::Implemented)]);
        queries.insert("economicResource", vec![record("b", ImplementationStatus::Implemented)]);
        let mutations = ScanResult::new();

        let whole = collect_records(VfModule::Observation.classes(), &queries);
        let mut pieces = collect_records(&["economicEvent"], &queries);
        pieces.extend(collect_records(&["economicResource"], &queries));

        assert_eq!(whole, pieces);
        assert_eq!(aggregate(&[VfModule::Observation], &queries, &mutations)[0].queries, whole);
    }

    #[test]
    fn test_module_table() {
        assert_eq!(VfModule::all().len(), 16);
        assert_eq!(VfModule::ProcessSpecification.as_str(), "process_specification");
        assert_eq!(VfModule::Measurement.classes(), &["unit"]);
        assert!(VfModule::Util.classes().is_empty());

        let undocumented: Vec<_> = VfModule::all().iter().filter(|m| !m.is_documented()).collect();
        assert_eq!(undocumented, vec![&VfModule::Util, &VfModule::Pagination]);
    }
}
