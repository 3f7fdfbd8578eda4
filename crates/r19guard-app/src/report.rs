use r19guard_types::{CompatibilityReport, ReportEnvelope, SCHEMA_REPORT_V1, ToolMeta};
use time::OffsetDateTime;

/// Wrap a report with provenance for persisting.
pub fn build_envelope(
    project: &str,
    report: CompatibilityReport,
    started_at: OffsetDateTime,
    finished_at: OffsetDateTime,
) -> ReportEnvelope {
    ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "r19guard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at,
        project: project.to_string(),
        report,
    }
}

/// Process exit code for a finished check: `0` clean, `2` issues found.
pub fn verdict_exit_code(report: &CompatibilityReport) -> i32 {
    if report.is_clean() { 0 } else { 2 }
}
