//! Stable identifiers for checks, fix targets, and npm artifacts.
//!
//! `check_id` is a dotted namespace. `code` is a short snake_case discriminator.

// Checks
pub const CHECK_REACT_VERSION: &str = "react.version";
pub const CHECK_DEPS_KNOWN_INCOMPATIBLE: &str = "deps.known_incompatible";

// Codes: react.version
pub const CODE_REACT_BELOW_19: &str = "react_below_19";

// Codes: deps.known_incompatible
pub const CODE_INCOMPATIBLE_RANGE: &str = "incompatible_range";

// Fix targets
pub const FILE_NPMRC: &str = ".npmrc";
pub const FILE_PACKAGE_JSON: &str = "package.json";
pub const FILE_CONFIG: &str = "r19guard.toml";

// npm knobs
pub const NPMRC_LEGACY_PEER_DEPS_LINE: &str = "legacy-peer-deps=true";

/// The package whose declared range decides the project's React status.
pub const REACT_PACKAGE: &str = "react";
