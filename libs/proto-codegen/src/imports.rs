//! Import aggregation
//!
//! Collects the module references a generated file needs. Groups are kept apart and
//! in order so the renderer can separate them with blank lines; within a group paths
//! are deduplicated and sorted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An import statement
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Import {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl Import {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            alias: None,
        }
    }
}

/// Deduplicate and sort each group of paths, dropping groups left empty
pub fn aggregate<G, P>(groups: G) -> Vec<Vec<Import>>
where
    G: IntoIterator,
    G::Item: IntoIterator<Item = P>,
    P: Into<String>,
{
    groups
        .into_iter()
        .map(|group| group.into_iter().map(Import::new).collect::<Vec<_>>())
        .filter_map(normalize_group)
        .collect()
}

fn normalize_group(mut group: Vec<Import>) -> Option<Vec<Import>> {
    group.sort();
    group.dedup_by(|a, b| a.path == b.path);
    (!group.is_empty()).then_some(group)
}

/// Accumulates imports for one generated file
#[derive(Debug, Clone, Default)]
pub struct ImportSet {
    standard: Vec<String>,
    third_party: Vec<String>,
    /// Imports of other schema units, path -> local package name
    units: BTreeMap<String, String>,
}

impl ImportSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn standard(&mut self, path: &str) {
        self.standard.push(path.to_string());
    }

    pub fn third_party(&mut self, path: &str) {
        self.third_party.push(path.to_string());
    }

    /// Import another unit under the local name its types are qualified with;
    /// aliased when that name differs from the last path segment
    pub fn unit(&mut self, import_path: &str, local_name: &str) {
        self.units
            .insert(import_path.to_string(), local_name.to_string());
    }

    /// Ordered groups: standard library, third party, other units
    pub fn into_groups(self) -> Vec<Vec<Import>> {
        let units = self
            .units
            .into_iter()
            .map(|(path, package)| {
                let last_segment = path.rsplit('/').next().unwrap_or(&path);
                let alias = (last_segment != package).then_some(package);
                Import { path, alias }
            })
            .collect();

        let mut groups = aggregate([self.standard, self.third_party]);
        groups.extend(normalize_group(units));
        groups
    }
}
