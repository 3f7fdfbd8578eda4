//! The checker facade: `check`, `apply_fixes`, and `explain` for one project directory.

use crate::error::CheckerError;
use crate::explain::ExplainOutput;
use camino::{Utf8Path, Utf8PathBuf};
use r19guard_domain::policy::EffectiveConfig;
use r19guard_repo::ApplyOutcome;
use r19guard_settings::R19guardConfigV1;
use r19guard_types::{CompatibilityReport, Fix};

#[derive(Clone, Debug)]
pub struct CheckerConfig {
    /// Emit summary events at `info` level. Never changes returned data.
    pub verbose: bool,
    /// Directory holding `package.json`.
    pub project_path: Utf8PathBuf,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            project_path: Utf8PathBuf::from("."),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct DependencyCompatibilityChecker {
    config: CheckerConfig,
}

impl DependencyCompatibilityChecker {
    pub fn new(config: CheckerConfig) -> Self {
        Self { config }
    }

    pub fn project_path(&self) -> &Utf8Path {
        &self.config.project_path
    }

    /// Evaluate the project's manifest against the knowledge base.
    ///
    /// Findings are not errors: a project with issues still yields `Ok`.
    pub fn check(&self) -> Result<CompatibilityReport, CheckerError> {
        let model = r19guard_repo::load_project(self.project_path())?;
        let effective = self.effective_config()?;
        let report = r19guard_domain::evaluate(&model, &effective);

        if self.config.verbose {
            tracing::info!(
                project = %self.project_path(),
                react = report.react.status.as_str(),
                scanned = report.data.dependencies_scanned,
                findings = report.data.findings_total,
                fixes = report.fixes.len(),
                "check complete"
            );
        }
        Ok(report)
    }

    /// Apply fixes to `.npmrc` and `package.json`. `update` fixes come back as commands.
    pub fn apply_fixes(&self, fixes: &[Fix]) -> Result<ApplyOutcome, CheckerError> {
        let outcome = r19guard_repo::apply_fixes(self.project_path(), fixes)?;
        if self.config.verbose {
            tracing::info!(
                npmrc_updated = outcome.npmrc_updated,
                manifest_updated = outcome.manifest_updated,
                commands = outcome.commands.len(),
                "fixes applied"
            );
        }
        Ok(outcome)
    }

    /// Look up a package in the effective knowledge base (built-ins plus `r19guard.toml` rules).
    pub fn explain(&self, package: &str) -> Result<ExplainOutput, CheckerError> {
        let effective = self.effective_config()?;
        Ok(crate::explain::lookup(&effective.knowledge_base, package))
    }

    fn effective_config(&self) -> Result<EffectiveConfig, CheckerError> {
        let cfg = match r19guard_repo::read_config_text(self.project_path())? {
            Some(text) => {
                tracing::debug!("using r19guard.toml");
                r19guard_settings::parse_config_toml(&text).map_err(CheckerError::config)?
            }
            None => R19guardConfigV1::default(),
        };
        let resolved = r19guard_settings::resolve_config(cfg).map_err(CheckerError::config)?;
        Ok(resolved.effective)
    }
}
