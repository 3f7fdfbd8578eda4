use r19guard_repo::{ApplyError, ManifestError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckerError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("invalid r19guard.toml: {message}")]
    Config { message: String },

    #[error(transparent)]
    Apply(#[from] ApplyError),
}

impl CheckerError {
    pub(crate) fn config(err: anyhow::Error) -> Self {
        CheckerError::Config {
            message: format!("{err:#}"),
        }
    }

    /// True when the project has no `package.json`.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CheckerError::Manifest(ManifestError::NotFound { .. })
                | CheckerError::Apply(ApplyError::Manifest(ManifestError::NotFound { .. }))
        )
    }
}
