//! Fuzz target for `package.json`, `.npmrc`, and fix-document handling.
//!
//! Goal: The parsers should **never panic** on any input.
//! They may return errors, but panics are unacceptable.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_manifest_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = r19guard_repo::fuzz::parse_package_json(text);
        let _ = r19guard_repo::fuzz::decode_fixes_json(text);

        let merged = r19guard_repo::fuzz::merge_npmrc_line(text, "legacy-peer-deps=true");
        assert_eq!(
            r19guard_repo::fuzz::merge_npmrc_line(&merged, "legacy-peer-deps=true"),
            merged
        );
    }
});
