//! Project adapters: read `package.json`, apply fixes to `.npmrc` and `package.json`.
//!
//! This crate does filesystem IO. It never runs npm; `update` fixes are handed back to the
//! caller as commands.

#![forbid(unsafe_code)]

mod apply;
mod error;
mod manifest;

pub use apply::{ApplyOutcome, apply_fixes, decode_fixes};
pub use error::{ApplyError, ManifestError};
pub use manifest::{load_project, read_config_text};

/// Fuzz-friendly API for exercising parsers without filesystem access.
/// These functions never panic on any input.
pub mod fuzz {
    use r19guard_domain::model::ProjectModel;

    /// Parse arbitrary text as a `package.json`.
    pub fn parse_package_json(text: &str) -> Result<ProjectModel, String> {
        super::manifest::parse_project(text)
    }

    /// Merge a `key=value` line into arbitrary `.npmrc` text.
    pub fn merge_npmrc_line(existing: &str, line: &str) -> String {
        super::apply::merge_npmrc_line(existing, line)
    }

    /// Decode fixes from arbitrary JSON text.
    pub fn decode_fixes_json(text: &str) -> Result<usize, String> {
        let doc: serde_json::Value = serde_json::from_str(text).map_err(|e| e.to_string())?;
        super::decode_fixes(&doc)
            .map(|fixes| fixes.len())
            .map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::fuzz;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn parse_package_json_never_panics(text in ".{0,256}") {
            let _ = fuzz::parse_package_json(&text);
        }

        #[test]
        fn decode_fixes_never_panics(text in ".{0,256}") {
            let _ = fuzz::decode_fixes_json(&text);
        }

        #[test]
        fn npmrc_merge_is_idempotent(
            existing in prop::collection::vec("[a-z-]{1,12}=[a-z0-9]{0,6}", 0..6),
            value in "[a-z]{1,5}",
        ) {
            let line = format!("legacy-peer-deps={value}");
            let text = existing.join("\n");
            let once = fuzz::merge_npmrc_line(&text, &line);
            let twice = fuzz::merge_npmrc_line(&once, &line);
            prop_assert_eq!(&once, &twice);
            prop_assert!(once.lines().any(|l| l == line));
            prop_assert_eq!(once.lines().filter(|l| l.starts_with("legacy-peer-deps=")).count(), 1);
        }
    }
}
