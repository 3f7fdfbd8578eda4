use crate::model::{R19guardConfigV1, RemediationConfig, RuleConfig, SCHEMA_CONFIG_V1};
use anyhow::Context;
use globset::Glob;
use r19guard_domain::policy::EffectiveConfig;
use r19guard_domain::rules::{CompatibilityRule, Remediation};
use r19guard_domain::semver::VersionRange;
use semver::Version;

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
}

pub fn resolve_config(cfg: R19guardConfigV1) -> anyhow::Result<ResolvedConfig> {
    if let Some(schema) = cfg.schema.as_deref()
        && schema != SCHEMA_CONFIG_V1
    {
        anyhow::bail!("unsupported config schema: {schema} (expected {SCHEMA_CONFIG_V1})");
    }

    let mut effective = EffectiveConfig::default();

    if let Some(include_dev) = cfg.include_dev {
        effective.include_dev = include_dev;
    }

    if let Some(target) = cfg.target_react.as_deref() {
        effective.target_react = parse_target(target)?;
    }

    validate_ignore(&cfg.ignore)?;
    effective.ignore = cfg.ignore;

    let mut rules = Vec::with_capacity(cfg.rules.len());
    for rule in &cfg.rules {
        rules.push(to_rule(rule).with_context(|| format!("invalid rule for {}", rule.package))?);
    }
    effective.knowledge_base.extend(rules);

    Ok(ResolvedConfig { effective })
}

fn parse_target(v: &str) -> anyhow::Result<Version> {
    Version::parse(v.trim().trim_start_matches('v'))
        .with_context(|| format!("invalid target_react: {v} (expected a full version like 19.0.0)"))
}

fn validate_ignore(patterns: &[String]) -> anyhow::Result<()> {
    for pattern in patterns {
        Glob::new(pattern).with_context(|| format!("invalid ignore glob: {pattern}"))?;
    }
    Ok(())
}

fn to_rule(rule: &RuleConfig) -> anyhow::Result<CompatibilityRule> {
    if rule.package.trim().is_empty() {
        anyhow::bail!("rule package name must not be empty");
    }

    let remediation = match &rule.remediation {
        RemediationConfig::None => Remediation::None,
        RemediationConfig::Update { range } => {
            VersionRange::parse(range)?;
            Remediation::Update {
                range: range.clone(),
            }
        }
        RemediationConfig::LegacyPeerDeps => Remediation::LegacyPeerDeps,
        RemediationConfig::Override { package, version } => {
            VersionRange::parse(version)?;
            Remediation::Override {
                package: package.clone(),
                version: version.clone(),
            }
        }
    };

    Ok(CompatibilityRule::new(
        rule.package.clone(),
        &rule.incompatible,
        rule.issue.clone(),
        remediation,
    )?)
}
