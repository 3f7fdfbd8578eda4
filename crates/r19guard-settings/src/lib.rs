//! Config parsing and policy resolution.
//!
//! This crate is IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::{R19guardConfigV1, RemediationConfig, RuleConfig, SCHEMA_CONFIG_V1};
pub use resolve::ResolvedConfig;

/// Parse `r19guard.toml` into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<R19guardConfigV1> {
    let cfg: R19guardConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config used by the engine (defaults + config file + custom rules).
pub fn resolve_config(cfg: R19guardConfigV1) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg)
}
