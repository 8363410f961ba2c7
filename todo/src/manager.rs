//! Owner of the single todo list for one workspace.
//!
//! Every mutation is applied in memory through [`crate::core::rules`] and then
//! the whole list is written back to the todo file before returning. The
//! manager assumes it is the only writer of that file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::core::rules::{check_item, deactivate, require_active, uncheck_item};
use crate::core::types::TodoList;
use crate::error::TodoError;
use crate::io::config::TodoConfig;
use crate::io::paths::{PathResolver, resolve_todo_path};
use crate::io::todo_store::{load_list, remove_list, write_list};
use crate::render;

/// Successful operation result: the list after the operation (if any) and a
/// human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoOutcome {
    pub list: Option<TodoList>,
    pub message: String,
}

#[derive(Debug)]
pub struct TodoListManager {
    workspace: PathBuf,
    todo_path: PathBuf,
    atomic_write: bool,
    current: Option<TodoList>,
    load_warning: Option<String>,
}

impl TodoListManager {
    /// Open the manager for `workspace`.
    ///
    /// The todo path is resolved once here: the resolver's project directory
    /// if available, otherwise the configured legacy path. Never fails;
    /// problems loading an existing file are kept in [`Self::load_warning`].
    pub fn open(
        workspace: impl Into<PathBuf>,
        cfg: &TodoConfig,
        resolver: Option<&dyn PathResolver>,
    ) -> Self {
        let workspace = workspace.into();
        let todo_path = resolve_todo_path(&workspace, cfg, resolver);
        Self::from_parts(workspace, todo_path, cfg.atomic_write)
    }

    /// Open the manager with an explicit todo file.
    pub fn with_path(workspace: impl Into<PathBuf>, todo_path: impl Into<PathBuf>) -> Self {
        Self::from_parts(workspace.into(), todo_path.into(), true)
    }

    fn from_parts(workspace: PathBuf, todo_path: PathBuf, atomic_write: bool) -> Self {
        if let Some(parent) = todo_path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                warn!(path = %parent.display(), error = %err, "failed to create todo directory");
            }
        }

        let (current, load_warning) = match load_list(&todo_path) {
            Ok(list) => (list, None),
            Err(err) => {
                let warning = format!("{err:#}");
                warn!(
                    path = %todo_path.display(),
                    warning = %warning,
                    "ignoring unreadable todo list"
                );
                (None, Some(warning))
            }
        };

        debug!(
            workspace = %workspace.display(),
            path = %todo_path.display(),
            loaded = current.is_some(),
            "todo manager opened"
        );

        Self {
            workspace,
            todo_path,
            atomic_write,
            current,
            load_warning,
        }
    }

    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    pub fn storage_path(&self) -> &Path {
        &self.todo_path
    }

    /// Why the persisted list could not be loaded at construction, if it couldn't.
    pub fn load_warning(&self) -> Option<&str> {
        self.load_warning.as_deref()
    }

    /// The current list, only while it is active.
    pub fn active_list(&self) -> Option<&TodoList> {
        require_active(self.current.as_ref()).ok()
    }

    /// Replace any existing list with a new one built from `titles`.
    pub fn create<S: AsRef<str>>(&mut self, titles: &[S]) -> Result<TodoOutcome, TodoError> {
        let list = TodoList::new(titles, Utc::now())?;
        if self.current.is_some() {
            debug!("discarding previous todo list");
        }
        let list = self.current.insert(list);
        persist(&self.todo_path, list, self.atomic_write)?;
        info!(items = list.len(), "todo list created");

        Ok(TodoOutcome {
            message: format!("Created todo list with {} items", list.len()),
            list: Some(list.clone()),
        })
    }

    /// Check item `order` (1-based).
    ///
    /// Checking the last open item deactivates the list. Deactivation happens
    /// before the write, so neither memory nor disk ever holds an active list
    /// with every item checked.
    pub fn check(&mut self, order: usize) -> Result<TodoOutcome, TodoError> {
        let now = Utc::now();
        let list = self.current.as_mut().ok_or(TodoError::NoActiveList)?;
        let summary = check_item(list, order, now)?;
        if summary.completes_list {
            deactivate(list, now);
        }
        persist(&self.todo_path, list, self.atomic_write)?;

        if summary.completes_list {
            info!(items = list.len(), "todo list completed");
            return Ok(TodoOutcome {
                message: format!(
                    "All {} items completed; todo list is now inactive",
                    list.len()
                ),
                list: Some(list.clone()),
            });
        }

        debug!(order, "todo item checked");
        let title = list
            .item(order)
            .map(|item| item.title.clone())
            .unwrap_or_default();
        Ok(TodoOutcome {
            message: format!("Checked item {order}: {title}"),
            list: Some(list.clone()),
        })
    }

    /// Uncheck item `order` and every item after it.
    pub fn uncheck(&mut self, order: usize) -> Result<TodoOutcome, TodoError> {
        let list = self.current.as_mut().ok_or(TodoError::NoActiveList)?;
        let summary = uncheck_item(list, order, Utc::now())?;
        persist(&self.todo_path, list, self.atomic_write)?;
        debug!(order, unchecked = ?summary.unchecked, "todo items unchecked");

        Ok(TodoOutcome {
            message: format!(
                "Unchecked {} item(s) starting at item {}",
                summary.unchecked.len(),
                order
            ),
            list: Some(list.clone()),
        })
    }

    /// The active list, or an empty outcome when there is none.
    pub fn show(&self) -> Result<TodoOutcome, TodoError> {
        Ok(match self.active_list() {
            Some(list) => TodoOutcome {
                message: render::status_line(list),
                list: Some(list.clone()),
            },
            None => TodoOutcome {
                list: None,
                message: "No active todo list".to_string(),
            },
        })
    }

    /// Drop the active list and delete the todo file.
    pub fn clear(&mut self) -> Result<TodoOutcome, TodoError> {
        require_active(self.current.as_ref())?;
        self.current = None;
        let removed = remove_list(&self.todo_path).map_err(TodoError::persistence)?;
        info!(removed, "todo list cleared");

        Ok(TodoOutcome {
            list: None,
            message: "Todo list cleared".to_string(),
        })
    }

    /// One-line progress summary of the active list.
    pub fn status_line(&self) -> Option<String> {
        self.active_list().map(render::status_line)
    }

    /// Agent prompt block for the active list.
    pub fn prompt_text(&self) -> Result<Option<String>> {
        self.active_list().map(render::prompt_text).transpose()
    }
}

fn persist(path: &Path, list: &TodoList, atomic: bool) -> Result<(), TodoError> {
    write_list(path, list, atomic).map_err(TodoError::persistence)
}
