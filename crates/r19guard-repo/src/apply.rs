//! Apply remediation fixes to project files.
//!
//! Every edit is read-modify-write and idempotent. All fixes are validated and all new file
//! contents are computed before anything touches the disk; each file is then replaced via a
//! temp file in the project directory and a rename.

use crate::error::{ApplyError, ManifestError};
use crate::manifest::{read_manifest_object, read_optional};
use camino::{Utf8Path, Utf8PathBuf};
use r19guard_types::{Fix, FixKind, ids};
use serde_json::{Map, Value};
use std::fs::Permissions;
use std::io::{self, Write};

/// What `apply_fixes` changed on disk, plus the commands it left to the caller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub npmrc_updated: bool,
    pub manifest_updated: bool,
    /// `update` fixes are never executed; their commands are returned in fix order.
    pub commands: Vec<String>,
}

impl ApplyOutcome {
    pub fn files_changed(&self) -> usize {
        usize::from(self.npmrc_updated) + usize::from(self.manifest_updated)
    }
}

#[derive(Debug)]
struct PlannedWrite {
    path: Utf8PathBuf,
    contents: String,
}

pub fn apply_fixes(root: &Utf8Path, fixes: &[Fix]) -> Result<ApplyOutcome, ApplyError> {
    let mut npmrc_lines: Vec<&str> = Vec::new();
    let mut overrides: Vec<(&str, &str)> = Vec::new();
    let mut outcome = ApplyOutcome::default();

    for fix in fixes {
        match fix {
            Fix::Update { command, .. } => outcome.commands.push(command.clone()),
            Fix::Config {
                package,
                file,
                content,
            } => {
                if file != ids::FILE_NPMRC {
                    return Err(unsupported(FixKind::Config, package, file));
                }
                if npmrc_entry(content).is_none() {
                    return Err(ApplyError::InvalidFix {
                        message: format!("config line for {package} is not key=value: '{content}'"),
                    });
                }
                npmrc_lines.push(content.trim());
            }
            Fix::Override {
                package,
                file,
                key,
                version,
            } => {
                if file != ids::FILE_PACKAGE_JSON {
                    return Err(unsupported(FixKind::Override, package, file));
                }
                if key.trim().is_empty() || version.trim().is_empty() {
                    return Err(ApplyError::InvalidFix {
                        message: format!("override for {package} needs a key and a version"),
                    });
                }
                overrides.push((key, version));
            }
        }
    }

    let mut planned = Vec::new();

    if !npmrc_lines.is_empty() {
        let path = root.join(ids::FILE_NPMRC);
        let existing = read_optional(&path)?;
        let mut text = existing.clone().unwrap_or_default();
        for line in &npmrc_lines {
            text = merge_npmrc_line(&text, line);
        }
        if existing.as_deref() != Some(text.as_str()) {
            outcome.npmrc_updated = true;
            planned.push(PlannedWrite {
                path,
                contents: text,
            });
        }
    }

    if !overrides.is_empty() {
        let path = root.join(ids::FILE_PACKAGE_JSON);
        let mut manifest = read_manifest_object(&path)?;
        if set_overrides(&mut manifest, &overrides).map_err(|message| ManifestError::Parse {
            path: path.clone(),
            message,
        })? {
            outcome.manifest_updated = true;
            let contents = render_manifest(&manifest).map_err(|source| ApplyError::Serialize {
                path: path.clone(),
                source,
            })?;
            planned.push(PlannedWrite { path, contents });
        }
    }

    for write in &planned {
        tracing::debug!(path = %write.path, "writing");
        write_atomic(&write.path, &write.contents)?;
    }

    Ok(outcome)
}

fn unsupported(kind: FixKind, package: &str, file: &str) -> ApplyError {
    ApplyError::UnsupportedFixTarget {
        kind: kind.as_str(),
        package: package.to_string(),
        file: file.to_string(),
    }
}

/// `key=value` with comments and blank lines excluded.
fn npmrc_entry(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
        return None;
    }
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    (!key.is_empty()).then_some((key, value.trim()))
}

/// Make `line`, verbatim, the single entry for its key. Other spellings of the same key
/// (`key = value`, other values, duplicates) are replaced. Text that already holds exactly
/// `line` for the key is returned as is.
pub(crate) fn merge_npmrc_line(existing: &str, line: &str) -> String {
    let line = line.trim();
    let Some((key, _)) = npmrc_entry(line) else {
        return existing.to_string();
    };

    let same_key: Vec<&str> = existing
        .lines()
        .filter(|current| npmrc_entry(current).is_some_and(|(k, _)| k == key))
        .map(str::trim)
        .collect();
    if same_key == [line] {
        return existing.to_string();
    }

    let mut out: Vec<&str> = Vec::new();
    let mut placed = false;
    for current in existing.lines() {
        match npmrc_entry(current) {
            Some((k, _)) if k == key => {
                if !placed {
                    out.push(line);
                    placed = true;
                }
            }
            _ => out.push(current),
        }
    }
    if !placed {
        out.push(line);
    }

    let mut text = out.join("\n");
    text.push('\n');
    text
}

/// Returns whether the manifest changed.
fn set_overrides(manifest: &mut Map<String, Value>, pins: &[(&str, &str)]) -> Result<bool, String> {
    let before = manifest.get("overrides").cloned();

    let entry = manifest
        .entry("overrides")
        .or_insert_with(|| Value::Object(Map::new()));
    let Value::Object(table) = entry else {
        return Err("'overrides' must be an object".to_string());
    };
    for (key, version) in pins {
        table.insert((*key).to_string(), Value::String((*version).to_string()));
    }

    Ok(manifest.get("overrides") != before.as_ref())
}

/// npm's own layout: two-space indent and a trailing newline.
pub(crate) fn render_manifest(manifest: &Map<String, Value>) -> Result<String, serde_json::Error> {
    let mut text = serde_json::to_string_pretty(manifest)?;
    text.push('\n');
    Ok(text)
}

fn write_atomic(path: &Utf8Path, contents: &str) -> Result<(), ApplyError> {
    let write_err = |source: io::Error| ApplyError::Write {
        path: path.to_owned(),
        source,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };

    // Temp files are created owner-only; the replacement keeps the target's mode.
    let permissions = match std::fs::metadata(path) {
        Ok(meta) => Some(meta.permissions()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => new_file_permissions(),
        Err(source) => return Err(write_err(source)),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(contents.as_bytes()).map_err(write_err)?;
    if let Some(permissions) = permissions {
        tmp.as_file().set_permissions(permissions).map_err(write_err)?;
    }
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

#[cfg(unix)]
fn new_file_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<Permissions> {
    None
}

/// Decode fixes from a JSON document: a bare array, a report (`{ "fixes": [...] }`), or a
/// report envelope (`{ "report": { "fixes": [...] } }`).
pub fn decode_fixes(doc: &Value) -> Result<Vec<Fix>, ApplyError> {
    let items = match doc {
        Value::Array(items) => items,
        Value::Object(map) => map
            .get("fixes")
            .or_else(|| map.get("report").and_then(|r| r.get("fixes")))
            .and_then(Value::as_array)
            .ok_or_else(|| ApplyError::InvalidFix {
                message: "document has no 'fixes' array".to_string(),
            })?,
        _ => {
            return Err(ApplyError::InvalidFix {
                message: "expected a fix array or a report object".to_string(),
            });
        }
    };

    items.iter().enumerate().map(|(i, item)| decode_fix(i, item)).collect()
}

fn decode_fix(index: usize, item: &Value) -> Result<Fix, ApplyError> {
    let kind = item
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| ApplyError::InvalidFix {
            message: format!("fix #{index} has no string 'type'"),
        })?;
    if FixKind::parse(kind).is_none() {
        return Err(ApplyError::UnknownRemediationType {
            kind: kind.to_string(),
        });
    }
    serde_json::from_value(item.clone()).map_err(|e| ApplyError::InvalidFix {
        message: format!("fix #{index}: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const LINE: &str = "legacy-peer-deps=true";

    #[test]
    fn npmrc_line_is_appended_once() {
        assert_eq!(merge_npmrc_line("", LINE), "legacy-peer-deps=true\n");
        assert_eq!(
            merge_npmrc_line("registry=https://r.example\n", LINE),
            "registry=https://r.example\nlegacy-peer-deps=true\n"
        );
        let once = merge_npmrc_line("registry=x", LINE);
        assert_eq!(merge_npmrc_line(&once, LINE), once);
    }

    #[test]
    fn npmrc_existing_value_is_rewritten_in_place() {
        assert_eq!(
            merge_npmrc_line("a=1\nlegacy-peer-deps=false\nb=2\n", LINE),
            "a=1\nlegacy-peer-deps=true\nb=2\n"
        );
        assert_eq!(
            merge_npmrc_line("legacy-peer-deps=false\nlegacy-peer-deps=true\n", LINE),
            "legacy-peer-deps=true\n"
        );
    }

    #[test]
    fn npmrc_exact_line_leaves_text_untouched() {
        let text = "# comment\nlegacy-peer-deps=true";
        assert_eq!(merge_npmrc_line(text, LINE), text);
    }

    #[test]
    fn npmrc_spaced_spelling_is_replaced_verbatim() {
        let merged = merge_npmrc_line("# comment\nlegacy-peer-deps = true\n", LINE);
        assert_eq!(merged, "# comment\nlegacy-peer-deps=true\n");
        assert_eq!(merge_npmrc_line(&merged, LINE), merged);
    }

    #[test]
    fn overrides_are_created_and_merged() {
        let mut manifest = json!({"name": "x", "dependencies": {}})
            .as_object()
            .cloned()
            .expect("object");
        assert!(set_overrides(&mut manifest, &[("react-is", "^19.0.0")]).expect("set"));
        assert!(!set_overrides(&mut manifest, &[("react-is", "^19.0.0")]).expect("set"));
        assert_eq!(manifest["overrides"], json!({"react-is": "^19.0.0"}));
        let keys: Vec<_> = manifest.keys().cloned().collect();
        assert_eq!(keys, vec!["name", "dependencies", "overrides"]);
    }

    #[test]
    fn non_object_overrides_is_an_error() {
        let mut manifest = json!({"overrides": "nope"}).as_object().cloned().expect("object");
        assert!(set_overrides(&mut manifest, &[("react-is", "^19.0.0")]).is_err());
    }

    #[test]
    fn manifest_renders_with_two_space_indent() {
        let manifest = json!({"a": {"b": "c"}}).as_object().cloned().expect("object");
        assert_eq!(render_manifest(&manifest).expect("render"), "{\n  \"a\": {\n    \"b\": \"c\"\n  }\n}\n");
    }

    #[test]
    fn decode_accepts_arrays_reports_and_envelopes() {
        let fixes = json!([{"type": "update", "package": "antd", "command": "npm install antd@^5.22.0"}]);
        assert_eq!(decode_fixes(&fixes).expect("array").len(), 1);
        assert_eq!(decode_fixes(&json!({"fixes": fixes})).expect("report").len(), 1);
        assert_eq!(
            decode_fixes(&json!({"report": {"fixes": fixes}})).expect("envelope").len(),
            1
        );
    }

    #[test]
    fn decode_rejects_unknown_type() {
        let err = decode_fixes(&json!([{"type": "reinstall", "package": "antd"}]))
            .expect_err("unknown type");
        assert!(matches!(err, ApplyError::UnknownRemediationType { ref kind } if kind == "reinstall"));
    }

    #[test]
    fn decode_rejects_malformed_known_type() {
        let err = decode_fixes(&json!([{"type": "override", "package": "recharts"}]))
            .expect_err("missing fields");
        assert!(matches!(err, ApplyError::InvalidFix { .. }));
    }
}
