//! Remediation actions as emitted in a report and consumed by `apply`.

use crate::ids;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single remediation action, tagged by `type` on the wire.
///
/// Every fix names the `package` whose finding produced it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Fix {
    /// Informational: a command for the user or CI to run.
    Update { package: String, command: String },
    /// A line that must be present in a line-oriented config file.
    Config {
        package: String,
        file: String,
        content: String,
    },
    /// An entry under the manifest's top-level `overrides` object.
    Override {
        package: String,
        file: String,
        key: String,
        version: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FixKind {
    Update,
    Config,
    Override,
}

impl FixKind {
    pub const ALL: [FixKind; 3] = [FixKind::Update, FixKind::Config, FixKind::Override];

    pub fn as_str(self) -> &'static str {
        match self {
            FixKind::Update => "update",
            FixKind::Config => "config",
            FixKind::Override => "override",
        }
    }

    pub fn parse(s: &str) -> Option<FixKind> {
        FixKind::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

impl Fix {
    /// `npm install <package>@<range>`.
    pub fn update(package: &str, range: &str) -> Self {
        Fix::Update {
            package: package.to_string(),
            command: format!("npm install {package}@{range}"),
        }
    }

    /// Ensure `legacy-peer-deps=true` in `.npmrc`.
    pub fn legacy_peer_deps(package: &str) -> Self {
        Fix::Config {
            package: package.to_string(),
            file: ids::FILE_NPMRC.to_string(),
            content: ids::NPMRC_LEGACY_PEER_DEPS_LINE.to_string(),
        }
    }

    /// Pin `key` to `version` via `package.json` `overrides`.
    pub fn pin_override(package: &str, key: &str, version: &str) -> Self {
        Fix::Override {
            package: package.to_string(),
            file: ids::FILE_PACKAGE_JSON.to_string(),
            key: key.to_string(),
            version: version.to_string(),
        }
    }

    pub fn kind(&self) -> FixKind {
        match self {
            Fix::Update { .. } => FixKind::Update,
            Fix::Config { .. } => FixKind::Config,
            Fix::Override { .. } => FixKind::Override,
        }
    }

    pub fn package(&self) -> &str {
        match self {
            Fix::Update { package, .. }
            | Fix::Config { package, .. }
            | Fix::Override { package, .. } => package,
        }
    }

    /// Target file, for fixes that touch the filesystem.
    pub fn file(&self) -> Option<&str> {
        match self {
            Fix::Update { .. } => None,
            Fix::Config { file, .. } | Fix::Override { file, .. } => Some(file),
        }
    }

    pub fn command(&self) -> Option<&str> {
        match self {
            Fix::Update { command, .. } => Some(command),
            _ => None,
        }
    }
}
