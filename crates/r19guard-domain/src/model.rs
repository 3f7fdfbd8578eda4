use r19guard_types::DependencySection;
use std::collections::{BTreeMap, BTreeSet};

/// In-memory view of a project's `package.json`.
#[derive(Clone, Debug, Default)]
pub struct ProjectModel {
    /// `name` field, if present.
    pub name: Option<String>,

    /// `dependencies` followed by `devDependencies`, in manifest order.
    pub dependencies: Vec<DependencyDecl>,

    /// Top-level `overrides` entries with string values.
    pub overrides: BTreeMap<String, String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DependencyDecl {
    pub section: DependencySection,
    pub name: String,
    /// Declared range, verbatim.
    pub range: String,
}

impl ProjectModel {
    /// Merged lookup table: production entries first, then dev entries; the first declaration of
    /// a name wins.
    pub fn merged(&self, include_dev: bool) -> Vec<&DependencyDecl> {
        let mut seen = BTreeSet::new();
        let mut out = Vec::new();
        for section in [DependencySection::Prod, DependencySection::Dev] {
            if section == DependencySection::Dev && !include_dev {
                continue;
            }
            for dep in self.dependencies.iter().filter(|d| d.section == section) {
                if seen.insert(dep.name.as_str()) {
                    out.push(dep);
                }
            }
        }
        out
    }

    pub fn declared(&self, name: &str, include_dev: bool) -> Option<&DependencyDecl> {
        self.merged(include_dev).into_iter().find(|d| d.name == name)
    }

    /// True if `overrides[key]` already pins exactly `version`.
    pub fn has_override(&self, key: &str, version: &str) -> bool {
        self.overrides.get(key).is_some_and(|pinned| pinned == version)
    }
}
