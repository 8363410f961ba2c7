//! Todo list load/save helpers with schema + invariant validation.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use jsonschema::validator_for;
use serde_json::Value;
use tracing::debug;

use crate::core::invariants::validate_invariants;
use crate::core::types::TodoList;

const TODO_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/schemas/todo_list.v1.schema.json"
));

/// Load and validate a list from disk (schema + invariants).
///
/// A missing file is `Ok(None)`.
pub fn load_list(path: &Path) -> Result<Option<TodoList>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no persisted todo list");
            return Ok(None);
        }
        Err(err) => return Err(err).with_context(|| format!("read todo {}", path.display())),
    };
    let value: Value = serde_json::from_str(&contents)
        .with_context(|| format!("parse todo {}", path.display()))?;
    validate_schema(&value)?;
    let list: TodoList = serde_json::from_value(value)
        .with_context(|| format!("deserialize todo {}", path.display()))?;
    validate_list_invariants(&list)?;
    debug!(
        path = %path.display(),
        items = list.len(),
        checked = list.checked_count(),
        active = list.active,
        "todo list loaded"
    );
    Ok(Some(list))
}

/// Write the full list to disk as pretty JSON with a trailing newline.
///
/// With `atomic`, writes a sibling temp file and renames it into place.
pub fn write_list(path: &Path, list: &TodoList, atomic: bool) -> Result<()> {
    debug!(
        path = %path.display(),
        checked = list.checked_count(),
        active = list.active,
        "writing todo list"
    );
    let mut buf = serde_json::to_string_pretty(list).context("serialize todo list")?;
    buf.push('\n');
    if atomic {
        write_atomic(path, &buf)
    } else {
        fs::write(path, buf).with_context(|| format!("write todo {}", path.display()))
    }
}

/// Delete the persisted list. Returns whether a file was removed.
pub fn remove_list(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "todo list removed");
            Ok(true)
        }
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err).with_context(|| format!("remove todo {}", path.display())),
    }
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let tmp_path = temp_path(path)?;
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp todo {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace todo {}", path.display()))?;
    Ok(())
}

fn temp_path(path: &Path) -> Result<PathBuf> {
    let name = path
        .file_name()
        .with_context(|| format!("todo path missing file name {}", path.display()))?;
    let mut tmp_name = name.to_os_string();
    tmp_name.push(".tmp");
    Ok(path.with_file_name(tmp_name))
}

fn validate_schema(value: &Value) -> Result<()> {
    let schema: Value = serde_json::from_str(TODO_SCHEMA).context("parse embedded todo schema")?;
    let compiled = validator_for(&schema).map_err(|err| anyhow!("invalid schema: {}", err))?;
    if !compiled.is_valid(value) {
        let messages = compiled
            .iter_errors(value)
            .map(|err| err.to_string())
            .collect::<Vec<_>>();
        return Err(anyhow!("todo schema validation failed: {}", messages.join("; ")));
    }
    Ok(())
}

fn validate_list_invariants(list: &TodoList) -> Result<()> {
    let errors = validate_invariants(list);
    if errors.is_empty() {
        return Ok(());
    }
    Err(anyhow!("todo invariants failed: {}", errors.join("; ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rules::check_item;
    use crate::test_support::{later, list_with_checked};

    /// Verifies write → load preserves every field, timestamps included.
    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("todo.json");
        let mut list = list_with_checked(3, 0);
        check_item(&mut list, 1, later(7)).expect("check");
        list.items[2].description = "notes".to_string();

        for atomic in [true, false] {
            write_list(&path, &list, atomic).expect("write");
            let loaded = load_list(&path).expect("load").expect("present");
            assert_eq!(loaded, list);
        }
        assert!(!temp.path().join("todo.json.tmp").exists());
    }

    #[test]
    fn written_file_is_pretty_with_trailing_newline() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("todo.json");
        write_list(&path, &list_with_checked(2, 0), true).expect("write");

        let contents = fs::read_to_string(&path).expect("read");
        assert!(contents.starts_with("{\n  \"items\": [\n"));
        assert!(contents.ends_with("}\n"));
        assert!(contents.contains("\"id\": \"item_2\""));
    }

    #[test]
    fn missing_file_loads_as_none() {
        let temp = tempfile::tempdir().expect("tempdir");
        assert!(
            load_list(&temp.path().join("missing.json"))
                .expect("load")
                .is_none()
        );
    }

    #[test]
    fn garbage_file_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("todo.json");
        fs::write(&path, "{not json").expect("write");
        let err = load_list(&path).unwrap_err();
        assert!(format!("{err:#}").contains("parse todo"));
    }

    #[test]
    fn schema_violation_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("todo.json");
        let mut value = serde_json::to_value(list_with_checked(2, 0)).expect("json");
        value["items"][0]["order"] = Value::from(0);
        fs::write(&path, value.to_string()).expect("write");

        let err = load_list(&path).unwrap_err();
        assert!(err.to_string().contains("schema validation failed"));
    }

    #[test]
    fn invariant_violation_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("todo.json");
        let mut list = list_with_checked(3, 0);
        list.items[2].checked = true;
        write_list(&path, &list, false).expect("write");

        let err = load_list(&path).unwrap_err();
        assert!(err.to_string().contains("todo invariants failed"));
    }

    #[test]
    fn remove_reports_whether_file_existed() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("todo.json");
        write_list(&path, &list_with_checked(2, 0), true).expect("write");

        assert!(remove_list(&path).expect("remove"));
        assert!(!path.exists());
        assert!(!remove_list(&path).expect("remove again"));
    }
}
