use crate::model::{DependencyDecl, ProjectModel};
use crate::policy::EffectiveConfig;
use crate::rules::{CompatibilityRule, KnowledgeBase};
use r19guard_types::DependencySection;

pub fn dep(name: &str, range: &str) -> DependencyDecl {
    DependencyDecl {
        section: DependencySection::Prod,
        name: name.to_string(),
        range: range.to_string(),
    }
}

pub fn dev_dep(name: &str, range: &str) -> DependencyDecl {
    DependencyDecl {
        section: DependencySection::Dev,
        ..dep(name, range)
    }
}

pub fn project(deps: Vec<DependencyDecl>) -> ProjectModel {
    ProjectModel {
        name: Some("app".to_string()),
        dependencies: deps,
        overrides: Default::default(),
    }
}

/// Built-in knowledge base extended with `rules`.
pub fn config_with_rules(rules: Vec<CompatibilityRule>) -> EffectiveConfig {
    let mut knowledge_base = KnowledgeBase::builtin();
    knowledge_base.extend(rules);
    EffectiveConfig {
        knowledge_base,
        ..EffectiveConfig::default()
    }
}
