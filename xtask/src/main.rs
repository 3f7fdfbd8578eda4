//! Developer tasks (schema generation, golden conformance, knowledge-base coverage).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use r19guard_domain::rules::{KnowledgeBase, Remediation};
use schemars::schema_for;
use std::fs;
use std::path::PathBuf;

/// Get the project root (parent of xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    match manifest_dir.parent() {
        Some(parent) if manifest_dir.ends_with("xtask") => parent.to_path_buf(),
        _ => manifest_dir,
    }
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

fn fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(r19guard_types::ReportEnvelope)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(r19guard_settings::R19guardConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "r19guard.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "r19guard.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Validate golden reports in tests/fixtures against the report schema");
    eprintln!("  explain-coverage  Validate every built-in rule has an issue and a remediation");
}

/// Validate every `tests/fixtures/*/expected.report.json` against the generated envelope schema.
fn conform() -> anyhow::Result<()> {
    let schema = serde_json::to_value(generate_report_schema())
        .context("Failed to convert report schema to JSON")?;
    let validator = jsonschema::draft202012::new(&schema)
        .map_err(|e| anyhow::anyhow!("Failed to compile schema: {}", e))?;
    println!("✓ r19guard.report.v1 schema compiles");

    let dir = fixtures_dir();
    let mut entries: Vec<PathBuf> = fs::read_dir(&dir)
        .with_context(|| format!("Failed to read {}", dir.display()))?
        .filter_map(|e| e.ok())
        .map(|e| e.path().join("expected.report.json"))
        .filter(|p| p.exists())
        .collect();
    entries.sort();

    let mut errors = Vec::new();
    for path in &entries {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let instance: serde_json::Value = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        for error in validator.iter_errors(&instance) {
            errors.push(format!("{}: {}", path.display(), error));
        }
        if instance["schema"] != r19guard_types::SCHEMA_REPORT_V1 {
            errors.push(format!(
                "{}: schema must be '{}'",
                path.display(),
                r19guard_types::SCHEMA_REPORT_V1
            ));
        }
    }

    if entries.is_empty() {
        bail!("no golden reports found under {}", dir.display());
    }
    if errors.is_empty() {
        println!("✓ {} golden reports conform", entries.len());
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {}", error);
        }
        bail!("Conformance failed with {} errors", errors.len())
    }
}

/// Every built-in rule must explain itself well enough for `r19guard explain`.
fn explain_coverage() -> anyhow::Result<()> {
    let kb = KnowledgeBase::builtin();
    let mut errors = Vec::new();

    for rule in kb.iter() {
        if rule.issue.trim().is_empty() {
            errors.push(format!("Rule '{}' has empty issue", rule.package));
        }
        if rule.incompatible.is_unsatisfiable() {
            errors.push(format!("Rule '{}' can never match", rule.package));
        }
        match &rule.remediation {
            Remediation::Update { range } if range.trim().is_empty() => {
                errors.push(format!("Rule '{}' has an empty update range", rule.package));
            }
            Remediation::Override { package, version }
                if package.trim().is_empty() || version.trim().is_empty() =>
            {
                errors.push(format!("Rule '{}' has an incomplete override", rule.package));
            }
            _ => {}
        }
    }

    if errors.is_empty() {
        println!("✓ {} built-in rules have explanations", kb.len());
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {}", error);
        }
        bail!("Explain coverage validation failed with {} errors", errors.len())
    }
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "conform" => conform(),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
