use crate::describe_fix;
use r19guard_types::{CompatibilityReport, ReactStatus};

pub fn render_markdown(report: &CompatibilityReport) -> String {
    let mut out = String::new();

    out.push_str("# React 19 compatibility report\n\n");
    let status = match report.react.status {
        ReactStatus::Compatible => "COMPATIBLE",
        ReactStatus::Incompatible => "INCOMPATIBLE",
        ReactStatus::Unknown => "UNKNOWN",
    };
    match &report.react.declared {
        Some(declared) => out.push_str(&format!("- React: **{status}** (`{declared}`)\n")),
        None => out.push_str(&format!("- React: **{status}** (not declared)\n")),
    }
    out.push_str(&format!(
        "- Dependencies scanned: {}\n- Findings: {}\n\n",
        report.data.dependencies_scanned, report.data.findings_total
    ));

    if report.dependencies.is_empty() {
        out.push_str("No known incompatibilities.\n");
        return out;
    }

    out.push_str("## Findings\n\n");
    for f in &report.dependencies {
        out.push_str(&format!(
            "- `{}` `{}` ({}) matches `{}`: {}\n",
            f.package,
            f.declared,
            f.section.as_str(),
            f.incompatible,
            f.issue
        ));
    }

    if !report.fixes.is_empty() {
        out.push_str("\n## Fixes\n\n");
        for fix in &report.fixes {
            out.push_str(&format!(
                "- [{}] `{}`: {}\n",
                fix.kind().as_str(),
                fix.package(),
                describe_fix(fix)
            ));
        }
    }

    out
}
