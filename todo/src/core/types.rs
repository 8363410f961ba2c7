//! Todo list data model.
//!
//! These types are the persisted contract (`todo.json`). Field names and
//! ordering are part of the on-disk format and must stay stable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TodoError;

/// Fewest items a list may be created with.
pub const MIN_ITEMS: usize = 2;
/// Most items a list may be created with.
pub const MAX_ITEMS: usize = 10;

/// A single step in a todo list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Stable identifier (`item_<order>`), unique within its list.
    pub id: String,
    pub title: String,
    /// Free text, not interpreted by any rule.
    #[serde(default)]
    pub description: String,
    pub checked: bool,
    /// 1-based position. Fixed at creation.
    pub order: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TodoItem {
    fn new(order: usize, title: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: format!("item_{order}"),
            title: title.trim().to_string(),
            description: String::new(),
            checked: false,
            order,
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn set_checked(&mut self, checked: bool, now: DateTime<Utc>) {
        self.checked = checked;
        self.updated_at = now;
    }
}

/// The single todo list tracked for a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    pub items: Vec<TodoItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// False once every item is checked; an inactive list accepts no operations.
    pub active: bool,
}

impl TodoList {
    /// Build a fresh, active list with every item unchecked.
    ///
    /// Titles are trimmed. Fails only if the count is outside
    /// [`MIN_ITEMS`]..=[`MAX_ITEMS`].
    pub fn new<S: AsRef<str>>(titles: &[S], now: DateTime<Utc>) -> Result<Self, TodoError> {
        if titles.len() < MIN_ITEMS || titles.len() > MAX_ITEMS {
            return Err(TodoError::Validation(format!(
                "a todo list needs between {MIN_ITEMS} and {MAX_ITEMS} items, got {}",
                titles.len()
            )));
        }

        let items = titles
            .iter()
            .enumerate()
            .map(|(idx, title)| TodoItem::new(idx + 1, title.as_ref(), now))
            .collect();

        Ok(Self {
            items,
            created_at: now,
            updated_at: now,
            active: true,
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at 1-based `order`, if in range.
    pub fn item(&self, order: usize) -> Option<&TodoItem> {
        order.checked_sub(1).and_then(|idx| self.items.get(idx))
    }

    pub fn checked_count(&self) -> usize {
        self.items.iter().filter(|item| item.checked).count()
    }

    pub fn is_complete(&self) -> bool {
        self.items.iter().all(|item| item.checked)
    }

    /// First unchecked item, i.e. the only one that can be checked next.
    pub fn next_ready(&self) -> Option<&TodoItem> {
        self.items.iter().find(|item| !item.checked)
    }
}

/// Derived display status of an item. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    /// Item is checked.
    Done,
    /// Unchecked, and every earlier item is checked.
    Ready,
    /// Unchecked, and some earlier item is still unchecked.
    Locked,
}

impl ItemStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemStatus::Done => "done",
            ItemStatus::Ready => "ready",
            ItemStatus::Locked => "locked",
        }
    }
}
