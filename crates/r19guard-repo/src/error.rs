use camino::Utf8PathBuf;
use std::io;
use thiserror::Error;

/// Failures reading or parsing `package.json` (and other project files).
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("no package.json at {path}")]
    NotFound { path: Utf8PathBuf },

    #[error("failed to read {path}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: Utf8PathBuf, message: String },
}

#[derive(Debug, Error)]
pub enum ApplyError {
    #[error("failed to write {path}")]
    Write {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize {path}")]
    Serialize {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown remediation type '{kind}'")]
    UnknownRemediationType { kind: String },

    #[error("{kind} fix for {package} targets unsupported file '{file}'")]
    UnsupportedFixTarget {
        kind: &'static str,
        package: String,
        file: String,
    },

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("invalid fix: {message}")]
    InvalidFix { message: String },
}
