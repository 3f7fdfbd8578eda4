//! Shared test utilities for the r19guard workspace.
//!
//! Golden reports are compared after [`normalize_nondeterministic`]; fixture projects are copied
//! into a scratch directory with [`copy_fixture`] before anything mutates them.

use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

/// Normalize non-deterministic JSON fields for golden-file comparison.
///
/// At the root of a report envelope (has `schema`, `tool`, `project` and `report`),
/// `tool.version` becomes `"__VERSION__"` and `project` becomes `"__PROJECT__"`.
/// `started_at` and `finished_at` become `"__TIMESTAMP__"` at any depth.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_envelope = obj.contains_key("schema")
            && obj.contains_key("tool")
            && obj.contains_key("project")
            && obj.contains_key("report");
        if is_envelope {
            obj.insert(
                "project".to_string(),
                Value::String("__PROJECT__".to_string()),
            );
            if let Some(tool_obj) = obj.get_mut("tool").and_then(Value::as_object_mut)
                && tool_obj.contains_key("version")
            {
                tool_obj.insert(
                    "version".to_string(),
                    Value::String("__VERSION__".to_string()),
                );
            }
        }
    }
    normalize_timestamps_recursive(&mut value);
    value
}

fn normalize_timestamps_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in ["started_at", "finished_at"] {
                if map.contains_key(key) {
                    map.insert(key.to_string(), Value::String("__TIMESTAMP__".to_string()));
                }
            }
            for val in map.values_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        _ => {}
    }
}

/// Copy the regular files of a fixture directory (non-recursive) into a fresh temp dir.
pub fn copy_fixture(fixture: &Path) -> std::io::Result<TempDir> {
    let tmp = TempDir::new()?;
    for entry in std::fs::read_dir(fixture)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            std::fs::copy(entry.path(), tmp.path().join(entry.file_name()))?;
        }
    }
    Ok(tmp)
}
