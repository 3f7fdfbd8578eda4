use crate::fingerprint::fingerprint_for_dep;
use crate::model::{DependencyDecl, ProjectModel};
use crate::policy::EffectiveConfig;
use crate::rules::CompatibilityRule;
use crate::semver::VersionRange;
use globset::{Glob, GlobSet, GlobSetBuilder};
use r19guard_types::{
    CompatibilityReport, CompatibilitySummary, DependencyFinding, Fix, ReactReport, ReactStatus,
    ids,
};

pub fn evaluate(model: &ProjectModel, cfg: &EffectiveConfig) -> CompatibilityReport {
    let react = react_report(model, cfg);
    let ignore = build_ignore_set(&cfg.ignore);

    let mut data = CompatibilitySummary::default();
    let mut matched: Vec<(DependencyFinding, Option<Fix>)> = Vec::new();

    for dep in model.merged(cfg.include_dev) {
        if dep.name == ids::REACT_PACKAGE {
            continue;
        }
        data.dependencies_scanned += 1;

        if ignore.as_ref().is_some_and(|set| set.is_match(&dep.name)) {
            tracing::debug!(package = %dep.name, "ignored by config");
            data.ignored += 1;
            continue;
        }

        let Some(rule) = cfg.knowledge_base.get(&dep.name) else {
            continue;
        };
        data.rules_evaluated += 1;

        if let Some(finding) = check_dependency(dep, rule) {
            let fix = rule.fix();
            if let Some(Fix::Override { key, version, .. }) = &fix
                && model.has_override(key, version)
            {
                tracing::debug!(package = %dep.name, %key, %version, "override already pinned");
            }
            matched.push((finding, fix));
        }
    }

    // Deterministic ordering; names are unique after merging.
    matched.sort_by(|(a, _), (b, _)| a.package.cmp(&b.package));
    data.findings_total = matched.len() as u32;

    let (dependencies, fixes): (Vec<_>, Vec<_>) = matched.into_iter().unzip();

    CompatibilityReport {
        react,
        dependencies,
        fixes: fixes.into_iter().flatten().collect(),
        data,
    }
}

fn check_dependency(dep: &DependencyDecl, rule: &CompatibilityRule) -> Option<DependencyFinding> {
    let declared = match VersionRange::parse(&dep.range) {
        Ok(range) => range,
        Err(err) => {
            tracing::warn!(package = %dep.name, "skipping unresolvable range: {err}");
            return None;
        }
    };

    if !declared.intersects(&rule.incompatible) {
        tracing::debug!(
            package = %dep.name,
            declared = %declared,
            incompatible = %rule.incompatible,
            "declared range clears the knowledge base"
        );
        return None;
    }

    Some(DependencyFinding {
        package: dep.name.clone(),
        declared: dep.range.clone(),
        incompatible: rule.incompatible.to_string(),
        issue: rule.issue.clone(),
        section: dep.section,
        fingerprint: fingerprint_for_dep(
            ids::CHECK_DEPS_KNOWN_INCOMPATIBLE,
            ids::CODE_INCOMPATIBLE_RANGE,
            &dep.name,
            &dep.range,
        ),
    })
}

fn react_report(model: &ProjectModel, cfg: &EffectiveConfig) -> ReactReport {
    let Some(decl) = model.declared(ids::REACT_PACKAGE, cfg.include_dev) else {
        return ReactReport {
            status: ReactStatus::Unknown,
            declared: None,
        };
    };

    let status = match VersionRange::parse(&decl.range).map(|r| r.min_version()) {
        Ok(Some(min)) if min >= cfg.target_react => ReactStatus::Compatible,
        Ok(Some(_)) => ReactStatus::Incompatible,
        Ok(None) => ReactStatus::Unknown,
        Err(err) => {
            tracing::warn!("cannot reason about the react range: {err}");
            ReactStatus::Unknown
        }
    };

    ReactReport {
        status,
        declared: Some(decl.range.clone()),
    }
}

fn build_ignore_set(patterns: &[String]) -> Option<GlobSet> {
    if patterns.is_empty() {
        return None;
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).expect("ignore patterns must be validated in r19guard-settings");
        builder.add(glob);
    }
    Some(
        builder
            .build()
            .expect("ignore patterns must be validated in r19guard-settings"),
    )
}
