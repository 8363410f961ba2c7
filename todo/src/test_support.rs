//! Test-only helpers for constructing lists and throwaway workspaces.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::core::types::TodoList;
use crate::manager::TodoListManager;

/// Deterministic creation timestamp used across tests.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5)
        .single()
        .expect("valid fixed timestamp")
}

/// `fixed_now()` shifted forward by `secs` seconds.
pub fn later(secs: i64) -> DateTime<Utc> {
    fixed_now() + Duration::seconds(secs)
}

/// Titles `step 1`..`step len`.
pub fn titles(len: usize) -> Vec<String> {
    (1..=len).map(|n| format!("step {n}")).collect()
}

/// Active list of `len` items whose first `checked` items are checked.
pub fn list_with_checked(len: usize, checked: usize) -> TodoList {
    let mut list = TodoList::new(&titles(len), fixed_now()).expect("valid test list");
    for item in list.items.iter_mut().take(checked) {
        item.checked = true;
    }
    list
}

/// Temporary workspace root with a manager bound to `<root>/.loom/todo.json`.
pub struct TestWorkspace {
    temp: tempfile::TempDir,
}

impl TestWorkspace {
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            temp: tempfile::tempdir()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn todo_path(&self) -> PathBuf {
        self.path().join(".loom").join("todo.json")
    }

    /// Open a fresh manager, reloading whatever is on disk.
    pub fn manager(&self) -> TodoListManager {
        TodoListManager::with_path(self.path(), self.todo_path())
    }
}
