//! Per-origin bookkeeping of imported packages.
//!
//! One resolved dependency per `(origin, imported-package-name)` pair, so a
//! consistent remapping can be emitted after traversal.

use super::Dependency;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Where an import originated.
///
/// The project is a distinguished tag rather than an empty source name, so
/// the key space stays disjoint from legal source names.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Origin {
    Project,
    /// Root source name of the importing package.
    Package(String),
}

impl Origin {
    /// Root source name for error texts; `None` for the project.
    #[must_use]
    pub fn root_source_name(&self) -> Option<&str> {
        match self {
            Self::Project => None,
            Self::Package(root) => Some(root),
        }
    }
}

/// Map of `(origin, imported-package-name) -> dependency`.
///
/// Slots are written once and never overwritten; re-recording an equal
/// dependency is a no-op.
#[derive(Debug, Default)]
pub struct DependencyMap {
    entries: BTreeMap<Origin, BTreeMap<String, Dependency>>,
}

impl DependencyMap {
    #[must_use]
    pub fn get(&self, origin: &Origin, package_name: &str) -> Option<&Dependency> {
        self.entries.get(origin)?.get(package_name)
    }

    pub fn record(&mut self, origin: Origin, package_name: String, dependency: Dependency) {
        match self.entries.entry(origin).or_default().entry(package_name) {
            Entry::Occupied(existing) => {
                debug_assert_eq!(
                    existing.get(),
                    &dependency,
                    "dependency slot resolved twice with different targets"
                );
            }
            Entry::Vacant(slot) => {
                slot.insert(dependency);
            }
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate all edges in a stable order: project origin first, then
    /// package origins by root source name, package names alphabetical
    /// within each origin.
    pub fn iter(&self) -> impl Iterator<Item = (&Origin, &str, &Dependency)> {
        self.entries.iter().flat_map(|(origin, deps)| {
            deps.iter()
                .map(move |(name, dep)| (origin, name.as_str(), dep))
        })
    }
}
