use crate::describe_fix;
use r19guard_types::CompatibilityReport;

/// Plain terminal output.
pub fn render_text(report: &CompatibilityReport) -> String {
    let mut out = String::new();

    match &report.react.declared {
        Some(declared) => out.push_str(&format!(
            "react {declared}: {}\n",
            report.react.status.as_str()
        )),
        None => out.push_str(&format!("react: {}\n", report.react.status.as_str())),
    }

    if report.dependencies.is_empty() {
        out.push_str("no known incompatible dependencies\n");
    } else {
        out.push_str(&format!(
            "{} incompatible dependencies:\n",
            report.dependencies.len()
        ));
        for f in &report.dependencies {
            out.push_str(&format!(
                "  {}@{} (incompatible {}): {}\n",
                f.package, f.declared, f.incompatible, f.issue
            ));
        }
    }

    if !report.fixes.is_empty() {
        out.push_str("suggested fixes:\n");
        for fix in &report.fixes {
            out.push_str(&format!("  {}: {}\n", fix.package(), describe_fix(fix)));
        }
    }

    out
}
