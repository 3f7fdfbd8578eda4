//! The `explain` use case: show what the knowledge base knows about a package.

use r19guard_domain::rules::{CompatibilityRule, KnowledgeBase};

#[derive(Clone, Debug)]
pub enum ExplainOutput {
    Found(CompatibilityRule),
    /// Unknown package; includes every package the knowledge base covers.
    NotFound { package: String, known: Vec<String> },
}

pub(crate) fn lookup(kb: &KnowledgeBase, package: &str) -> ExplainOutput {
    match kb.get(package) {
        Some(rule) => ExplainOutput::Found(rule.clone()),
        None => ExplainOutput::NotFound {
            package: package.to_string(),
            known: kb.packages().into_iter().map(str::to_string).collect(),
        },
    }
}

/// Format a rule for terminal display.
pub fn format_explanation(rule: &CompatibilityRule) -> String {
    let mut out = String::new();

    out.push_str(&rule.package);
    out.push('\n');
    out.push_str(&"=".repeat(rule.package.len()));
    out.push_str("\n\n");
    out.push_str(&format!("Incompatible versions: {}\n\n", rule.incompatible));
    out.push_str(&rule.issue);
    out.push_str("\n\n");
    out.push_str("Remediation\n");
    out.push_str("-----------\n");
    out.push_str(&rule.remediation.describe());
    out.push('\n');

    out
}

pub fn format_not_found(package: &str, known: &[String]) -> String {
    let mut out = String::new();

    out.push_str(&format!("No known React 19 issues for: {package}\n\n"));
    out.push_str("Known packages:\n");
    for name in known {
        out.push_str(&format!("  - {name}\n"));
    }

    out
}
