use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a dependency finding.
///
/// Identity fields:
/// - check_id
/// - code
/// - package name
/// - declared range
pub fn fingerprint_for_dep(check_id: &str, code: &str, package: &str, declared: &str) -> String {
    let canonical = [check_id, code, package, declared].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
