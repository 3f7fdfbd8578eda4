//! Use case orchestration for r19guard.
//!
//! This crate coordinates the domain, settings, and repo layers. The CLI depends on it and only
//! handles argument parsing and output.

#![forbid(unsafe_code)]

mod checker;
mod error;
mod explain;
mod report;

pub use checker::{CheckerConfig, DependencyCompatibilityChecker};
pub use error::CheckerError;
pub use explain::{ExplainOutput, format_explanation, format_not_found};
pub use r19guard_domain::compare_versions;
pub use r19guard_repo::{ApplyOutcome, decode_fixes};
pub use report::{build_envelope, verdict_exit_code};
