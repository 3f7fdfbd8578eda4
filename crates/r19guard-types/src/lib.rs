//! Stable DTOs and IDs used across the r19guard workspace.
//!
//! This crate is intentionally boring:
//! - data types for the compatibility report and its findings
//! - remediation payloads (`Fix`) as they appear on the wire
//! - stable string IDs, file names, and schema identifiers
//! - the report envelope written by the CLI

#![forbid(unsafe_code)]

pub mod envelope;
pub mod fix;
pub mod ids;
pub mod report;

pub use envelope::{ReportEnvelope, SCHEMA_REPORT_V1, ToolMeta};
pub use fix::{Fix, FixKind};
pub use report::{
    CompatibilityReport, CompatibilitySummary, DependencyFinding, DependencySection, ReactReport,
    ReactStatus,
};
