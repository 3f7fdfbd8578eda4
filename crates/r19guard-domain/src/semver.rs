//! Version comparison and npm range reasoning.
//!
//! Two separate tools live here:
//! - [`compare_versions`]: a plain integer-triplet comparator for dotted version strings.
//! - [`VersionRange`]: npm range expressions (`^`, `~`, comparators, X-ranges, hyphen ranges,
//!   `||` unions) lowered to intervals over [`semver::Version`].

use semver::{Prerelease, Version};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Bound;

/// Compare two dotted version strings component-wise as integers.
///
/// Only `major.minor.patch` are considered. Missing components count as zero, so `"1.0"` equals
/// `"1.0.0"`. Each component contributes its leading decimal digits (`"3-beta"` reads as `3`);
/// a component without leading digits reads as `0`, and one too large for `u64` saturates. A leading `v` or `=` is ignored.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    numeric_triplet(a).cmp(&numeric_triplet(b))
}

fn numeric_triplet(v: &str) -> [u64; 3] {
    let v = v.trim().trim_start_matches(['v', 'V', '=']);
    let mut out = [0u64; 3];
    for (slot, part) in out.iter_mut().zip(v.split('.')) {
        let end = part
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(part.len());
        let digits = &part[..end];
        *slot = match digits.parse::<u64>() {
            Ok(n) => n,
            Err(_) if digits.is_empty() => 0,
            // Only overflow remains once the digits are non-empty.
            Err(_) => u64::MAX,
        };
    }
    out
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangeParseError {
    pub input: String,
    pub reason: String,
}

impl fmt::Display for RangeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid version range '{}': {}", self.input, self.reason)
    }
}

impl std::error::Error for RangeParseError {}

/// A parsed npm version range: a union of intervals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VersionRange {
    source: String,
    sets: Vec<Interval>,
}

impl VersionRange {
    pub fn parse(input: &str) -> Result<Self, RangeParseError> {
        let err = |reason: String| RangeParseError {
            input: input.to_string(),
            reason,
        };

        let mut sets = Vec::new();
        for alternative in input.trim().split("||") {
            sets.push(parse_set(alternative.trim()).map_err(err)?);
        }

        Ok(Self {
            source: input.trim().to_string(),
            sets,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// True if some version satisfies both ranges.
    pub fn intersects(&self, other: &VersionRange) -> bool {
        self.sets
            .iter()
            .any(|a| other.sets.iter().any(|b| !a.intersect(b).is_empty()))
    }

    pub fn contains(&self, version: &Version) -> bool {
        self.sets.iter().any(|set| set.contains(version))
    }

    /// Lowest version that satisfies the range, or `None` if nothing does.
    pub fn min_version(&self) -> Option<Version> {
        self.sets.iter().filter_map(Interval::min_version).min()
    }

    /// True if no version can satisfy the range (e.g. `>=2.0.0 <1.0.0`).
    pub fn is_unsatisfiable(&self) -> bool {
        self.sets.iter().all(Interval::is_empty)
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl std::str::FromStr for VersionRange {
    type Err = RangeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VersionRange::parse(s)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Interval {
    lower: Bound<Version>,
    upper: Bound<Version>,
}

impl Interval {
    fn any() -> Self {
        Self {
            lower: Bound::Unbounded,
            upper: Bound::Unbounded,
        }
    }

    fn empty() -> Self {
        Self {
            lower: Bound::Excluded(Version::new(0, 0, 0)),
            upper: Bound::Excluded(Version::new(0, 0, 0)),
        }
    }

    fn between(lower: Version, upper_excluded: Version) -> Self {
        Self {
            lower: Bound::Included(lower),
            upper: Bound::Excluded(upper_excluded),
        }
    }

    fn at_least(lower: Bound<Version>) -> Self {
        Self {
            lower,
            upper: Bound::Unbounded,
        }
    }

    fn below(upper: Bound<Version>) -> Self {
        Self {
            lower: Bound::Unbounded,
            upper,
        }
    }

    fn intersect(&self, other: &Interval) -> Interval {
        Interval {
            lower: tighter_lower(&self.lower, &other.lower),
            upper: tighter_upper(&self.upper, &other.upper),
        }
    }

    fn is_empty(&self) -> bool {
        match (&self.lower, &self.upper) {
            (Bound::Unbounded, _) | (_, Bound::Unbounded) => false,
            (Bound::Included(l), Bound::Included(u)) => l > u,
            (Bound::Included(l), Bound::Excluded(u))
            | (Bound::Excluded(l), Bound::Included(u))
            | (Bound::Excluded(l), Bound::Excluded(u)) => l >= u,
        }
    }

    fn contains(&self, v: &Version) -> bool {
        let above = match &self.lower {
            Bound::Unbounded => true,
            Bound::Included(l) => v >= l,
            Bound::Excluded(l) => v > l,
        };
        let below = match &self.upper {
            Bound::Unbounded => true,
            Bound::Included(u) => v <= u,
            Bound::Excluded(u) => v < u,
        };
        above && below
    }

    fn min_version(&self) -> Option<Version> {
        if self.is_empty() {
            return None;
        }
        let candidate = match &self.lower {
            Bound::Unbounded => Version::new(0, 0, 0),
            Bound::Included(v) => v.clone(),
            Bound::Excluded(v) if v.pre.is_empty() => {
                Version::new(v.major, v.minor, v.patch.saturating_add(1))
            }
            // The release that follows a prerelease tag.
            Bound::Excluded(v) => Version::new(v.major, v.minor, v.patch),
        };
        self.contains(&candidate).then_some(candidate)
    }
}

fn tighter_lower(a: &Bound<Version>, b: &Bound<Version>) -> Bound<Version> {
    match (a, b) {
        (Bound::Unbounded, other) | (other, Bound::Unbounded) => other.clone(),
        (Bound::Included(x), Bound::Included(y)) => Bound::Included(x.max(y).clone()),
        (Bound::Excluded(x), Bound::Excluded(y)) => Bound::Excluded(x.max(y).clone()),
        (Bound::Included(i), Bound::Excluded(e)) | (Bound::Excluded(e), Bound::Included(i)) => {
            if i > e {
                Bound::Included(i.clone())
            } else {
                Bound::Excluded(e.clone())
            }
        }
    }
}

fn tighter_upper(a: &Bound<Version>, b: &Bound<Version>) -> Bound<Version> {
    match (a, b) {
        (Bound::Unbounded, other) | (other, Bound::Unbounded) => other.clone(),
        (Bound::Included(x), Bound::Included(y)) => Bound::Included(x.min(y).clone()),
        (Bound::Excluded(x), Bound::Excluded(y)) => Bound::Excluded(x.min(y).clone()),
        (Bound::Included(i), Bound::Excluded(e)) | (Bound::Excluded(e), Bound::Included(i)) => {
            if i < e {
                Bound::Included(i.clone())
            } else {
                Bound::Excluded(e.clone())
            }
        }
    }
}

/// A version with possibly-wildcarded trailing components (`1`, `1.2`, `1.x`, `*`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Partial {
    major: Option<u64>,
    minor: Option<u64>,
    patch: Option<u64>,
    pre: Prerelease,
}

impl Partial {
    fn parse(input: &str) -> Result<Partial, String> {
        let s = input.trim().trim_start_matches(['v', 'V', '=']);
        // Build metadata never affects precedence.
        let s = s.split_once('+').map_or(s, |(core, _)| core);
        let (core, pre) = match s.split_once('-') {
            Some((core, pre)) => (core, Some(pre)),
            None => (s, None),
        };

        let mut out = Partial::default();
        if core.is_empty() {
            return match pre {
                None => Ok(out),
                Some(_) => Err(format!("missing version before prerelease in '{input}'")),
            };
        }

        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() > 3 {
            return Err(format!("too many version components in '{input}'"));
        }

        let mut slots = [None; 3];
        let mut wildcard_seen = false;
        for (slot, part) in slots.iter_mut().zip(&parts) {
            if matches!(*part, "x" | "X" | "*") {
                wildcard_seen = true;
                continue;
            }
            if wildcard_seen {
                return Err(format!("number after wildcard in '{input}'"));
            }
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(format!("non-numeric component '{part}' in '{input}'"));
            }
            *slot = Some(
                part.parse::<u64>()
                    .map_err(|e| format!("component '{part}' in '{input}': {e}"))?,
            );
        }
        [out.major, out.minor, out.patch] = slots;

        if let Some(pre) = pre {
            if out.patch.is_none() {
                return Err(format!("prerelease on partial version '{input}'"));
            }
            out.pre = Prerelease::new(pre).map_err(|e| format!("prerelease in '{input}': {e}"))?;
        }

        Ok(out)
    }

    fn is_full(&self) -> bool {
        self.patch.is_some()
    }

    /// Lowest version matched by the partial (`1.2` → `1.2.0`).
    fn floor(&self) -> Version {
        let mut v = Version::new(
            self.major.unwrap_or(0),
            self.minor.unwrap_or(0),
            self.patch.unwrap_or(0),
        );
        v.pre = self.pre.clone();
        v
    }

    /// First version past everything the partial matches (`1.2` → `1.3.0`, `1` → `2.0.0`).
    /// Only meaningful for partials with a major component.
    fn ceiling(&self) -> Version {
        let major = self.major.unwrap_or(0);
        match (self.minor, self.patch) {
            (None, _) => Version::new(major.saturating_add(1), 0, 0),
            (Some(minor), None) => Version::new(major, minor.saturating_add(1), 0),
            (Some(minor), Some(patch)) => Version::new(major, minor, patch.saturating_add(1)),
        }
    }
}

fn parse_set(input: &str) -> Result<Interval, String> {
    if input.is_empty() {
        return Ok(Interval::any());
    }

    if let Some((lo, hi)) = input.split_once(" - ") {
        return hyphen_range(lo, hi);
    }

    let mut interval = Interval::any();
    for comparator in comparators(input)? {
        let (op, version) = split_operator(&comparator);
        let partial = Partial::parse(version)?;
        interval = interval.intersect(&comparator_interval(op, &partial)?);
    }
    Ok(interval)
}

/// Split a comparator set into comparators, re-attaching operators written with a trailing
/// space (`>= 1.2.3`).
fn comparators(input: &str) -> Result<Vec<String>, String> {
    let mut out = Vec::new();
    let mut pending_op: Option<&str> = None;
    for token in input.split_whitespace() {
        if is_bare_operator(token) {
            if let Some(op) = pending_op {
                return Err(format!("operator '{op}' followed by operator '{token}'"));
            }
            pending_op = Some(token);
            continue;
        }
        match pending_op.take() {
            Some(op) => out.push(format!("{op}{token}")),
            None => out.push(token.to_string()),
        }
    }
    if let Some(op) = pending_op {
        return Err(format!("operator '{op}' without a version"));
    }
    Ok(out)
}

fn is_bare_operator(token: &str) -> bool {
    matches!(token, ">=" | "<=" | ">" | "<" | "=" | "^" | "~" | "~>")
}

fn split_operator(comparator: &str) -> (&str, &str) {
    for op in [">=", "<=", "~>", ">", "<", "=", "^", "~"] {
        if let Some(rest) = comparator.strip_prefix(op) {
            return (op, rest);
        }
    }
    ("", comparator)
}

fn comparator_interval(op: &str, p: &Partial) -> Result<Interval, String> {
    let Some(major) = p.major else {
        return Ok(match op {
            // Nothing is strictly above or below "any version".
            ">" | "<" => Interval::empty(),
            _ => Interval::any(),
        });
    };

    let interval = match op {
        "" | "=" => {
            if p.is_full() {
                let v = p.floor();
                Interval {
                    lower: Bound::Included(v.clone()),
                    upper: Bound::Included(v),
                }
            } else {
                Interval::between(p.floor(), p.ceiling())
            }
        }
        "^" => Interval::between(p.floor(), caret_ceiling(major, p)),
        "~" | "~>" => {
            let upper = match p.minor {
                None => Version::new(major.saturating_add(1), 0, 0),
                Some(minor) => Version::new(major, minor.saturating_add(1), 0),
            };
            Interval::between(p.floor(), upper)
        }
        ">=" => Interval::at_least(Bound::Included(p.floor())),
        ">" => {
            if p.is_full() {
                Interval::at_least(Bound::Excluded(p.floor()))
            } else {
                Interval::at_least(Bound::Included(p.ceiling()))
            }
        }
        "<" => Interval::below(Bound::Excluded(p.floor())),
        "<=" => {
            if p.is_full() {
                Interval::below(Bound::Included(p.floor()))
            } else {
                Interval::below(Bound::Excluded(p.ceiling()))
            }
        }
        other => return Err(format!("unsupported operator '{other}'")),
    };
    Ok(interval)
}

/// Upper bound of a caret range: the next change to the left-most non-zero component.
fn caret_ceiling(major: u64, p: &Partial) -> Version {
    if major > 0 {
        return Version::new(major.saturating_add(1), 0, 0);
    }
    match (p.minor, p.patch) {
        (None, _) => Version::new(1, 0, 0),
        (Some(minor), _) if minor > 0 => Version::new(0, minor.saturating_add(1), 0),
        (Some(_), None) => Version::new(0, 1, 0),
        (Some(_), Some(patch)) => Version::new(0, 0, patch.saturating_add(1)),
    }
}

fn hyphen_range(lo: &str, hi: &str) -> Result<Interval, String> {
    let lo = Partial::parse(lo)?;
    let hi = Partial::parse(hi)?;

    let lower = Bound::Included(lo.floor());
    let upper = match hi.major {
        None => Bound::Unbounded,
        Some(_) if hi.is_full() => Bound::Included(hi.floor()),
        Some(_) => Bound::Excluded(hi.ceiling()),
    };
    Ok(Interval { lower, upper })
}
