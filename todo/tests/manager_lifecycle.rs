//! Lifecycle tests that reopen the manager between operations.
//!
//! Every step goes through a fresh `TodoListManager` so the todo file on
//! disk, not in-memory state, carries progress from one call to the next.

use std::fs;

use loom_todo::error::TodoError;
use loom_todo::io::config::{ConfigLayer, TodoConfig};
use loom_todo::io::paths::ProjectPathResolver;
use loom_todo::manager::TodoListManager;
use loom_todo::test_support::{TestWorkspace, titles};

fn checked(manager: &TodoListManager) -> Vec<bool> {
    manager
        .active_list()
        .map(|list| list.items.iter().map(|item| item.checked).collect())
        .unwrap_or_default()
}

/// Create → check → uncheck cascade → complete, reopening after each step.
#[test]
fn progress_survives_reopen() {
    let ws = TestWorkspace::new().expect("workspace");
    ws.manager().create(&titles(4)).expect("create");

    for order in 1..=3 {
        ws.manager().check(order).expect("check");
    }
    assert_eq!(checked(&ws.manager()), vec![true, true, true, false]);

    ws.manager().uncheck(2).expect("uncheck");
    assert_eq!(checked(&ws.manager()), vec![true, false, false, false]);

    for order in 2..=4 {
        ws.manager().check(order).expect("check");
    }
    let reopened = ws.manager();
    assert!(reopened.active_list().is_none());
    assert!(reopened.load_warning().is_none());
    assert!(ws.todo_path().is_file(), "completed list stays on disk");
    assert_eq!(ws.manager().check(1).unwrap_err(), TodoError::NoActiveList);

    ws.manager().create(&["again", "fresh"]).expect("recreate");
    assert_eq!(checked(&ws.manager()), vec![false, false]);
}

/// Save → load keeps every field, timestamps included.
#[test]
fn reopened_list_is_identical() {
    let ws = TestWorkspace::new().expect("workspace");
    let mut manager = ws.manager();
    manager.create(&titles(3)).expect("create");
    let after_check = manager.check(1).expect("check").list.expect("list");

    assert_eq!(ws.manager().active_list(), Some(&after_check));
}

/// Clear deletes the file; a fresh manager sees no list.
#[test]
fn clear_is_visible_after_reopen() {
    let ws = TestWorkspace::new().expect("workspace");
    ws.manager().create(&titles(2)).expect("create");
    ws.manager().clear().expect("clear");

    assert!(!ws.todo_path().exists());
    let shown = ws.manager().show().expect("show");
    assert!(shown.list.is_none());
    assert_eq!(ws.manager().clear().unwrap_err(), TodoError::NoActiveList);
}

/// `open` stores the list under the resolver's project directory.
#[test]
fn open_uses_project_directory_from_config() {
    let ws = TestWorkspace::new().expect("workspace");
    let data_dir = ws.path().join("data");
    let cfg = ConfigLayer {
        data_dir: Some(data_dir.clone()),
        atomic_write: Some(false),
        ..ConfigLayer::default()
    }
    .resolve()
    .expect("config");
    let resolver = ProjectPathResolver::from_config(&cfg).expect("resolver");

    let mut manager = TodoListManager::open(ws.path(), &cfg, Some(&resolver));
    manager.create(&titles(2)).expect("create");

    assert!(
        manager
            .storage_path()
            .starts_with(data_dir.join("projects"))
    );
    assert!(manager.storage_path().is_file());
    assert!(!ws.todo_path().exists());

    let reopened = TodoListManager::open(ws.path(), &cfg, Some(&resolver));
    assert_eq!(reopened.storage_path(), manager.storage_path());
    assert!(reopened.active_list().is_some());
}

/// A corrupt file is reported, not fatal, and the next create replaces it.
#[test]
fn corrupt_file_is_recoverable() {
    let ws = TestWorkspace::new().expect("workspace");
    let path = ws.todo_path();
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(&path, "{\"items\": 3}").expect("write");

    let cfg = TodoConfig::default();
    let mut manager = TodoListManager::open(ws.path(), &cfg, None);
    assert!(manager.load_warning().is_some());
    assert!(manager.show().expect("show").list.is_none());

    manager.create(&titles(2)).expect("create");
    assert!(ws.manager().active_list().is_some());
}
