//! Fuzz target for npm range parsing and range reasoning.
//!
//! Goal: parsing, `intersects`, `contains`, and `compare_versions` **never panic**,
//! and `intersects` stays symmetric.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_range_parser
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use r19guard_domain::semver::VersionRange;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    left: &'a str,
    right: &'a str,
    version: &'a str,
}

fuzz_target!(|input: Input<'_>| {
    let _ = r19guard_domain::compare_versions(input.left, input.right);

    let (Ok(left), Ok(right)) = (VersionRange::parse(input.left), VersionRange::parse(input.right))
    else {
        return;
    };
    assert_eq!(left.intersects(&right), right.intersects(&left));
    let _ = left.min_version();

    if let Ok(version) = semver::Version::parse(input.version) {
        let _ = left.contains(&version);
    }
});
