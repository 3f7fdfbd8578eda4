use crate::Fix;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Verdict for the project's own `react` dependency.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReactStatus {
    Compatible,
    Incompatible,
    /// No `react` entry, or a range we cannot reason about.
    Unknown,
}

impl ReactStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ReactStatus::Compatible => "compatible",
            ReactStatus::Incompatible => "incompatible",
            ReactStatus::Unknown => "unknown",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReactReport {
    pub status: ReactStatus,
    /// The range declared for `react`, verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declared: Option<String>,
}

/// Manifest section a dependency was declared in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
pub enum DependencySection {
    #[serde(rename = "dependencies")]
    Prod,
    #[serde(rename = "devDependencies")]
    Dev,
}

impl DependencySection {
    pub fn as_str(self) -> &'static str {
        match self {
            DependencySection::Prod => "dependencies",
            DependencySection::Dev => "devDependencies",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DependencyFinding {
    pub package: String,
    /// Range declared in the manifest.
    pub declared: String,
    /// Range the knowledge base marks as conflicting with React 19.
    pub incompatible: String,
    pub issue: String,
    pub section: DependencySection,

    /// Stable identifier intended for dedup and trending.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub fingerprint: String,
}

/// Summary counters for a single check run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CompatibilitySummary {
    pub dependencies_scanned: u32,
    pub rules_evaluated: u32,
    pub findings_total: u32,
    /// Declared packages skipped because they matched an `ignore` pattern.
    pub ignored: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CompatibilityReport {
    pub react: ReactReport,
    pub dependencies: Vec<DependencyFinding>,
    pub fixes: Vec<Fix>,
    #[serde(default)]
    pub data: CompatibilitySummary,
}

impl CompatibilityReport {
    /// True when nothing needs attention: React is not known to be too old and no
    /// declared dependency matched the knowledge base.
    pub fn is_clean(&self) -> bool {
        self.react.status != ReactStatus::Incompatible && self.dependencies.is_empty()
    }

    pub fn finding(&self, package: &str) -> Option<&DependencyFinding> {
        self.dependencies.iter().find(|f| f.package == package)
    }

    pub fn fixes_for<'a>(&'a self, package: &'a str) -> impl Iterator<Item = &'a Fix> + 'a {
        self.fixes.iter().filter(move |f| f.package() == package)
    }
}
