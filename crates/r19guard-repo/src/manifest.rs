use crate::error::ManifestError;
use camino::{Utf8Path, Utf8PathBuf};
use r19guard_domain::model::{DependencyDecl, ProjectModel};
use r19guard_types::{DependencySection, ids};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::io;

/// Read and parse `<root>/package.json`.
pub fn load_project(root: &Utf8Path) -> Result<ProjectModel, ManifestError> {
    let path = root.join(ids::FILE_PACKAGE_JSON);
    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(ManifestError::NotFound { path });
        }
        Err(source) => return Err(ManifestError::Read { path, source }),
    };

    let model = parse_project(&text).map_err(|message| ManifestError::Parse {
        path: path.clone(),
        message,
    })?;
    tracing::debug!(
        %path,
        dependencies = model.dependencies.len(),
        "loaded manifest"
    );
    Ok(model)
}

/// Read `<root>/r19guard.toml` if it exists.
pub fn read_config_text(root: &Utf8Path) -> Result<Option<String>, ManifestError> {
    let path = root.join(ids::FILE_CONFIG);
    read_optional(&path)
}

pub(crate) fn read_optional(path: &Utf8Path) -> Result<Option<String>, ManifestError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ManifestError::Read {
            path: path.to_owned(),
            source,
        }),
    }
}

/// Read `package.json` as a raw JSON object, for read-modify-write edits.
pub(crate) fn read_manifest_object(path: &Utf8PathBuf) -> Result<Map<String, Value>, ManifestError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(ManifestError::NotFound { path: path.clone() });
        }
        Err(source) => {
            return Err(ManifestError::Read {
                path: path.clone(),
                source,
            });
        }
    };
    parse_object(&text).map_err(|message| ManifestError::Parse {
        path: path.clone(),
        message,
    })
}

fn parse_object(text: &str) -> Result<Map<String, Value>, String> {
    match serde_json::from_str::<Value>(text).map_err(|e| e.to_string())? {
        Value::Object(map) => Ok(map),
        other => Err(format!("expected a JSON object, found {}", json_kind(&other))),
    }
}

pub(crate) fn parse_project(text: &str) -> Result<ProjectModel, String> {
    let root = parse_object(text)?;

    let name = root.get("name").and_then(Value::as_str).map(str::to_string);

    let mut dependencies = Vec::new();
    for section in [DependencySection::Prod, DependencySection::Dev] {
        let Some(value) = root.get(section.as_str()) else {
            continue;
        };
        let Value::Object(entries) = value else {
            return Err(format!(
                "'{}' must be an object, found {}",
                section.as_str(),
                json_kind(value)
            ));
        };
        for (dep_name, range) in entries {
            let Value::String(range) = range else {
                return Err(format!(
                    "'{}.{dep_name}' must be a string, found {}",
                    section.as_str(),
                    json_kind(range)
                ));
            };
            dependencies.push(DependencyDecl {
                section,
                name: dep_name.clone(),
                range: range.clone(),
            });
        }
    }

    // Nested override objects scope a pin to one parent; only flat pins are modelled.
    let overrides: BTreeMap<String, String> = match root.get("overrides") {
        Some(Value::Object(entries)) => entries
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|v| (k.clone(), v.to_string())))
            .collect(),
        _ => BTreeMap::new(),
    };

    Ok(ProjectModel {
        name,
        dependencies,
        overrides,
    })
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
