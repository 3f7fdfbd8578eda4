use r19guard_types::{CompatibilityReport, ReactStatus, ids};

/// Render findings as GitHub Actions workflow command annotations.
///
/// Format:
/// `::{level} file=package.json::[{check_id}:{code}] {message}`
pub fn render_github_annotations(report: &CompatibilityReport) -> Vec<String> {
    let mut out = Vec::new();

    if report.react.status == ReactStatus::Incompatible {
        let declared = report.react.declared.as_deref().unwrap_or("");
        out.push(annotation(
            "error",
            ids::CHECK_REACT_VERSION,
            ids::CODE_REACT_BELOW_19,
            &format!("react {declared} allows versions below 19"),
        ));
    }

    for f in &report.dependencies {
        out.push(annotation(
            "warning",
            ids::CHECK_DEPS_KNOWN_INCOMPATIBLE,
            ids::CODE_INCOMPATIBLE_RANGE,
            &format!("{}@{} ({}): {}", f.package, f.declared, f.section.as_str(), f.issue),
        ));
    }

    out
}

fn annotation(level: &str, check_id: &str, code: &str, message: &str) -> String {
    let message = format!("[{check_id}:{code}] {message}")
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A");
    format!("::{level} file={}::{message}", ids::FILE_PACKAGE_JSON)
}
