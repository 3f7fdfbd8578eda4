use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const SCHEMA_CONFIG_V1: &str = "r19guard.config.v1";

/// `r19guard.toml` schema v1.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct R19guardConfigV1 {
    /// Optional schema string for tooling (`r19guard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Glob patterns of package names to skip (`@types/*`).
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Evaluate `devDependencies` too. Defaults to `true`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_dev: Option<bool>,

    /// Minimum React version counted as compatible. Defaults to `19.0.0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_react: Option<String>,

    /// Extra knowledge-base entries. An entry for a built-in package replaces it.
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RuleConfig {
    pub package: String,
    /// npm range of versions that conflict with React 19.
    pub incompatible: String,
    pub issue: String,
    #[serde(default)]
    pub remediation: RemediationConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RemediationConfig {
    #[default]
    None,
    Update {
        range: String,
    },
    LegacyPeerDeps,
    Override {
        package: String,
        version: String,
    },
}
