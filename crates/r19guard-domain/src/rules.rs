//! Knowledge base of packages known to conflict with React 19.
//!
//! The built-in table is plain data: adding a package means adding a row to
//! [`BUILTIN_RULES`], never a new branch in the engine.

use crate::semver::{RangeParseError, VersionRange};
use r19guard_types::Fix;
use std::collections::BTreeMap;

/// How a finding for a rule is remediated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Remediation {
    /// No automated suggestion (e.g. the package is abandoned).
    None,
    /// Upgrade the package itself to `range`.
    Update { range: String },
    /// Relax npm peer-dependency enforcement via `.npmrc`.
    LegacyPeerDeps,
    /// Force a (usually transitive) `package` to `version` via `package.json` `overrides`.
    Override { package: String, version: String },
}

impl Remediation {
    pub fn describe(&self) -> String {
        match self {
            Remediation::None => "no automated fix; replace the package".to_string(),
            Remediation::Update { range } => format!("upgrade to {range}"),
            Remediation::LegacyPeerDeps => "set legacy-peer-deps=true in .npmrc".to_string(),
            Remediation::Override { package, version } => {
                format!("pin {package} to {version} via package.json overrides")
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompatibilityRule {
    /// Exact package name the rule applies to.
    pub package: String,
    /// Versions known to conflict with React 19.
    pub incompatible: VersionRange,
    pub issue: String,
    pub remediation: Remediation,
}

impl CompatibilityRule {
    pub fn new(
        package: impl Into<String>,
        incompatible: &str,
        issue: impl Into<String>,
        remediation: Remediation,
    ) -> Result<Self, RangeParseError> {
        Ok(Self {
            package: package.into(),
            incompatible: VersionRange::parse(incompatible)?,
            issue: issue.into(),
            remediation,
        })
    }

    /// The single fix a finding for this rule produces, if any.
    pub fn fix(&self) -> Option<Fix> {
        match &self.remediation {
            Remediation::None => None,
            Remediation::Update { range } => Some(Fix::update(&self.package, range)),
            Remediation::LegacyPeerDeps => Some(Fix::legacy_peer_deps(&self.package)),
            Remediation::Override { package, version } => {
                Some(Fix::pin_override(&self.package, package, version))
            }
        }
    }
}

#[derive(Clone, Copy)]
enum BuiltinRemediation {
    None,
    Update(&'static str),
    LegacyPeerDeps,
    Override(&'static str, &'static str),
}

struct BuiltinRule {
    package: &'static str,
    incompatible: &'static str,
    issue: &'static str,
    remediation: BuiltinRemediation,
}

const BUILTIN_RULES: &[BuiltinRule] = &[
    BuiltinRule {
        package: "@radix-ui/react-select",
        incompatible: "<2.1.2",
        issue: "@radix-ui/react-select before 2.1.2 ships its own useEffectEvent shim, which \
                collides with the hook React 19 exports and breaks item selection",
        remediation: BuiltinRemediation::Update("^2.1.2"),
    },
    BuiltinRule {
        package: "antd",
        incompatible: "<5.22.0",
        issue: "antd before 5.22.0 depends on legacy ref handling (element.ref and findDOMNode), \
                both removed in React 19",
        remediation: BuiltinRemediation::Update("^5.22.0"),
    },
    BuiltinRule {
        package: "react-is",
        incompatible: "<19.0.0",
        issue: "react-is before 19 does not recognise React 19 element types, so isElement and \
                isValidElementType return false for valid elements",
        remediation: BuiltinRemediation::Update("^19.0.0"),
    },
    BuiltinRule {
        package: "next-auth",
        incompatible: "<5.0.0",
        issue: "next-auth v4 declares a React ^17 || ^18 peer dependency; npm refuses to install \
                it next to React 19 unless peer dependency checks are relaxed",
        remediation: BuiltinRemediation::LegacyPeerDeps,
    },
    BuiltinRule {
        package: "recharts",
        incompatible: "<3.0.0",
        issue: "recharts 2.x pulls in react-is 18, which misidentifies React 19 elements and \
                renders empty charts",
        remediation: BuiltinRemediation::Override("react-is", "^19.0.0"),
    },
    BuiltinRule {
        package: "react-dom",
        incompatible: "<19.0.0",
        issue: "react-dom must share React's major version; react-dom 18 fails at runtime \
                against React 19",
        remediation: BuiltinRemediation::Update("^19.0.0"),
    },
    BuiltinRule {
        package: "react-test-renderer",
        incompatible: "<19.0.0",
        issue: "react-test-renderer must share React's major version",
        remediation: BuiltinRemediation::Update("^19.0.0"),
    },
    BuiltinRule {
        package: "@types/react",
        incompatible: "<19.0.0",
        issue: "@types/react 18 lacks ref-as-prop and still declares the global JSX namespace, so \
                React 19 code does not type-check",
        remediation: BuiltinRemediation::Update("^19.0.0"),
    },
    BuiltinRule {
        package: "@types/react-dom",
        incompatible: "<19.0.0",
        issue: "@types/react-dom 18 types describe removed APIs such as ReactDOM.render",
        remediation: BuiltinRemediation::Update("^19.0.0"),
    },
    BuiltinRule {
        package: "@testing-library/react",
        incompatible: "<16.1.0",
        issue: "@testing-library/react before 16.1.0 imports act from react-dom/test-utils, \
                which React 19 removed",
        remediation: BuiltinRemediation::Update("^16.1.0"),
    },
    BuiltinRule {
        package: "framer-motion",
        incompatible: "<12.0.0",
        issue: "framer-motion before 12 reads element.ref during layout animations, which React \
                19 no longer exposes",
        remediation: BuiltinRemediation::Update("^12.0.0"),
    },
    BuiltinRule {
        package: "react-beautiful-dnd",
        incompatible: "*",
        issue: "react-beautiful-dnd is archived and relies on defaultProps for function \
                components, which React 19 ignores; migrate to @hello-pangea/dnd",
        remediation: BuiltinRemediation::None,
    },
];

impl BuiltinRule {
    fn to_rule(&self) -> CompatibilityRule {
        let remediation = match self.remediation {
            BuiltinRemediation::None => Remediation::None,
            BuiltinRemediation::Update(range) => Remediation::Update {
                range: range.to_string(),
            },
            BuiltinRemediation::LegacyPeerDeps => Remediation::LegacyPeerDeps,
            BuiltinRemediation::Override(package, version) => Remediation::Override {
                package: package.to_string(),
                version: version.to_string(),
            },
        };
        CompatibilityRule::new(self.package, self.incompatible, self.issue, remediation)
            .expect("built-in knowledge base ranges must parse")
    }
}

/// All built-in rules, in table order.
pub fn builtin_rules() -> Vec<CompatibilityRule> {
    BUILTIN_RULES.iter().map(BuiltinRule::to_rule).collect()
}

/// Rules keyed by exact package name.
#[derive(Clone, Debug)]
pub struct KnowledgeBase {
    rules: BTreeMap<String, CompatibilityRule>,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}

impl KnowledgeBase {
    pub fn builtin() -> Self {
        Self::from_rules(builtin_rules())
    }

    /// Later rules for the same package replace earlier ones.
    pub fn from_rules(rules: impl IntoIterator<Item = CompatibilityRule>) -> Self {
        let mut kb = Self {
            rules: BTreeMap::new(),
        };
        kb.extend(rules);
        kb
    }

    pub fn extend(&mut self, rules: impl IntoIterator<Item = CompatibilityRule>) {
        for rule in rules {
            self.rules.insert(rule.package.clone(), rule);
        }
    }

    pub fn get(&self, package: &str) -> Option<&CompatibilityRule> {
        self.rules.get(package)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules ordered by package name.
    pub fn iter(&self) -> impl Iterator<Item = &CompatibilityRule> {
        self.rules.values()
    }

    pub fn packages(&self) -> Vec<&str> {
        self.rules.keys().map(String::as_str).collect()
    }
}
