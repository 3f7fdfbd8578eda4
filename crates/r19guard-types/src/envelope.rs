use crate::CompatibilityReport;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for r19guard report files.
pub const SCHEMA_REPORT_V1: &str = "r19guard.report.v1";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Outer shape of a persisted report.
///
/// The inner `report` is exactly what `check()` returns; the envelope adds provenance so a
/// saved file can later be fed to `apply`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportEnvelope {
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    /// Project directory the report was produced for, as given on the command line.
    pub project: String,
    pub report: CompatibilityReport,
}
