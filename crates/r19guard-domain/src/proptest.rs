//! Property-based tests for the domain crate.
//!
//! These cover:
//! - `compare_versions` ordering laws
//! - range reasoning around caret, tilde and unions
//! - evaluation determinism regardless of manifest order

use crate::engine::evaluate;
use crate::policy::EffectiveConfig;
use crate::semver::{VersionRange, compare_versions};
use crate::test_support::{dep, project};
use proptest::prelude::*;
use semver::Version;
use std::cmp::Ordering;

fn arb_triplet() -> impl Strategy<Value = (u64, u64, u64)> {
    (0u64..40, 0u64..40, 0u64..40)
}

fn arb_version_string() -> impl Strategy<Value = String> {
    prop_oneof![
        arb_triplet().prop_map(|(a, b, c)| format!("{a}.{b}.{c}")),
        (0u64..40, 0u64..40).prop_map(|(a, b)| format!("{a}.{b}")),
        (0u64..40).prop_map(|a| format!("{a}")),
        arb_triplet().prop_map(|(a, b, c)| format!("v{a}.{b}.{c}")),
    ]
}

fn arb_range() -> impl Strategy<Value = String> {
    prop_oneof![
        arb_triplet().prop_map(|(a, b, c)| format!("^{a}.{b}.{c}")),
        arb_triplet().prop_map(|(a, b, c)| format!("~{a}.{b}.{c}")),
        arb_triplet().prop_map(|(a, b, c)| format!(">={a}.{b}.{c}")),
        arb_triplet().prop_map(|(a, b, c)| format!("<{a}.{b}.{c}")),
        arb_triplet().prop_map(|(a, b, c)| format!("{a}.{b}.{c}")),
        (0u64..40).prop_map(|a| format!("{a}.x")),
        (arb_triplet(), arb_triplet())
            .prop_map(|((a, b, c), (d, e, f))| format!("^{a}.{b}.{c} || ~{d}.{e}.{f}")),
        Just("*".to_string()),
    ]
}

proptest! {
    #[test]
    fn compare_versions_is_antisymmetric(a in arb_version_string(), b in arb_version_string()) {
        prop_assert_eq!(compare_versions(&a, &b), compare_versions(&b, &a).reverse());
    }

    #[test]
    fn compare_versions_is_reflexive(a in arb_version_string()) {
        prop_assert_eq!(compare_versions(&a, &a), Ordering::Equal);
    }

    #[test]
    fn compare_versions_agrees_with_semver_on_plain_triplets((a, b, c) in arb_triplet(), (d, e, f) in arb_triplet()) {
        let left = format!("{a}.{b}.{c}");
        let right = format!("{d}.{e}.{f}");
        prop_assert_eq!(
            compare_versions(&left, &right),
            Version::new(a, b, c).cmp(&Version::new(d, e, f))
        );
    }

    #[test]
    fn caret_contains_and_starts_at_its_base((a, b, c) in arb_triplet()) {
        let range = VersionRange::parse(&format!("^{a}.{b}.{c}")).unwrap();
        let base = Version::new(a, b, c);
        prop_assert!(range.contains(&base));
        prop_assert_eq!(range.min_version(), Some(base));
    }

    #[test]
    fn tilde_never_crosses_the_next_minor((a, b, c) in arb_triplet()) {
        let range = VersionRange::parse(&format!("~{a}.{b}.{c}")).unwrap();
        prop_assert!(range.contains(&Version::new(a, b, c)));
        prop_assert!(!range.contains(&Version::new(a, b + 1, 0)));
    }

    #[test]
    fn intersects_is_symmetric(x in arb_range(), y in arb_range()) {
        let x = VersionRange::parse(&x).unwrap();
        let y = VersionRange::parse(&y).unwrap();
        prop_assert_eq!(x.intersects(&y), y.intersects(&x));
    }

    #[test]
    fn satisfiable_range_intersects_itself(x in arb_range()) {
        let x = VersionRange::parse(&x).unwrap();
        prop_assert_eq!(x.intersects(&x), !x.is_unsatisfiable());
    }

    #[test]
    fn evaluation_ignores_manifest_order(ranges in prop::collection::vec(arb_range(), 4)) {
        let names = ["antd", "react-is", "recharts", "next-auth"];
        let deps: Vec<_> = names.iter().zip(&ranges).map(|(n, r)| dep(n, r)).collect();
        let mut reversed = deps.clone();
        reversed.reverse();

        let cfg = EffectiveConfig::default();
        let a = evaluate(&project(deps), &cfg);
        let b = evaluate(&project(reversed), &cfg);
        prop_assert_eq!(a, b);
    }
}
