//! Rendering utilities for terminals and CI surfaces (text, Markdown, GitHub annotations).

#![forbid(unsafe_code)]

mod gha;
mod markdown;
mod text;

pub use gha::render_github_annotations;
pub use markdown::render_markdown;
pub use text::render_text;

use r19guard_types::Fix;

/// One-line human description of a fix.
pub fn describe_fix(fix: &Fix) -> String {
    match fix {
        Fix::Update { command, .. } => format!("run `{command}`"),
        Fix::Config { file, content, .. } => format!("ensure `{content}` in {file}"),
        Fix::Override {
            file, key, version, ..
        } => format!("set overrides.{key} = \"{version}\" in {file}"),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use r19guard_types::{
        CompatibilityReport, CompatibilitySummary, DependencyFinding, DependencySection, Fix,
        ReactReport, ReactStatus,
    };

    pub fn clean() -> CompatibilityReport {
        CompatibilityReport {
            react: ReactReport {
                status: ReactStatus::Compatible,
                declared: Some("^19.0.0".to_string()),
            },
            dependencies: Vec::new(),
            fixes: Vec::new(),
            data: CompatibilitySummary {
                dependencies_scanned: 3,
                rules_evaluated: 1,
                findings_total: 0,
                ignored: 0,
            },
        }
    }

    pub fn with_issues() -> CompatibilityReport {
        CompatibilityReport {
            react: ReactReport {
                status: ReactStatus::Incompatible,
                declared: Some("^18.2.0".to_string()),
            },
            dependencies: vec![
                DependencyFinding {
                    package: "next-auth".to_string(),
                    declared: "^4.24.0".to_string(),
                    incompatible: "<5.0.0".to_string(),
                    issue: "peer range excludes React 19".to_string(),
                    section: DependencySection::Prod,
                    fingerprint: String::new(),
                },
                DependencyFinding {
                    package: "recharts".to_string(),
                    declared: "^2.5.0".to_string(),
                    incompatible: "<3.0.0".to_string(),
                    issue: "pulls in react-is 18".to_string(),
                    section: DependencySection::Dev,
                    fingerprint: String::new(),
                },
            ],
            fixes: vec![
                Fix::legacy_peer_deps("next-auth"),
                Fix::pin_override("recharts", "react-is", "^19.0.0"),
            ],
            data: CompatibilitySummary {
                dependencies_scanned: 4,
                rules_evaluated: 2,
                findings_total: 2,
                ignored: 0,
            },
        }
    }
}
