//! Sequential completion rules.
//!
//! Pure transitions over an in-memory [`TodoList`]. Callers own persistence.

use chrono::{DateTime, Utc};

use crate::core::types::TodoList;
use crate::error::TodoError;

/// Outcome of a successful check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckSummary {
    pub order: usize,
    /// True when this check left every item checked.
    pub completes_list: bool,
}

/// Outcome of a successful uncheck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UncheckSummary {
    pub order: usize,
    /// Orders that flipped from checked to unchecked, ascending.
    pub unchecked: Vec<usize>,
}

/// Return the list only if it exists and is active.
pub fn require_active(list: Option<&TodoList>) -> Result<&TodoList, TodoError> {
    match list {
        Some(list) if list.active => Ok(list),
        _ => Err(TodoError::NoActiveList),
    }
}

fn require_in_range(list: &TodoList, order: usize) -> Result<(), TodoError> {
    if order == 0 || order > list.len() {
        return Err(TodoError::Range {
            order,
            len: list.len(),
        });
    }
    Ok(())
}

/// Mark item `order` checked.
///
/// Allowed only when the previous item is checked and the target is not.
/// Does not deactivate the list; see [`deactivate`].
pub fn check_item(
    list: &mut TodoList,
    order: usize,
    now: DateTime<Utc>,
) -> Result<CheckSummary, TodoError> {
    if !list.active {
        return Err(TodoError::NoActiveList);
    }
    require_in_range(list, order)?;

    let idx = order - 1;
    if idx > 0 && !list.items[idx - 1].checked {
        let blocking = list.items[..idx]
            .iter()
            .find(|item| !item.checked)
            .map_or(order - 1, |item| item.order);
        return Err(TodoError::OrderViolation { order, blocking });
    }
    if list.items[idx].checked {
        return Err(TodoError::AlreadyChecked { order });
    }

    list.items[idx].set_checked(true, now);
    list.updated_at = now;

    Ok(CheckSummary {
        order,
        completes_list: list.is_complete(),
    })
}

/// Uncheck item `order` and every later item.
///
/// Only items that were checked get a new `updated_at`.
pub fn uncheck_item(
    list: &mut TodoList,
    order: usize,
    now: DateTime<Utc>,
) -> Result<UncheckSummary, TodoError> {
    if !list.active {
        return Err(TodoError::NoActiveList);
    }
    require_in_range(list, order)?;

    let idx = order - 1;
    if !list.items[idx].checked {
        return Err(TodoError::NotChecked { order });
    }

    let mut unchecked = Vec::new();
    for item in &mut list.items[idx..] {
        if item.checked {
            item.set_checked(false, now);
            unchecked.push(item.order);
        }
    }
    list.updated_at = now;

    Ok(UncheckSummary { order, unchecked })
}

/// Retire a fully checked list.
pub fn deactivate(list: &mut TodoList, now: DateTime<Utc>) {
    list.active = false;
    list.updated_at = now;
}
