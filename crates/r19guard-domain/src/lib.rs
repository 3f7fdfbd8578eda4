//! Pure compatibility evaluation (no IO).
//!
//! Input: a project model constructed elsewhere.
//! Output: the React verdict, dependency findings, and the fixes they imply.

#![forbid(unsafe_code)]

pub mod fingerprint;
pub mod model;
pub mod policy;
pub mod rules;
pub mod semver;

mod engine;

pub use engine::evaluate;
pub use crate::semver::compare_versions;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;
