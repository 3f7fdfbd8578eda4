use crate::rules::KnowledgeBase;
use semver::Version;

#[derive(Clone, Debug)]
pub struct EffectiveConfig {
    /// Lowest React version counted as compatible.
    pub target_react: Version,
    /// Evaluate `devDependencies` as well as `dependencies`.
    pub include_dev: bool,
    /// Glob patterns of package names to skip. Must be validated before evaluation.
    pub ignore: Vec<String>,
    pub knowledge_base: KnowledgeBase,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            target_react: Version::new(19, 0, 0),
            include_dev: true,
            ignore: Vec::new(),
            knowledge_base: KnowledgeBase::builtin(),
        }
    }
}
