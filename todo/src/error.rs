//! Error taxonomy for todo list operations.

use thiserror::Error;

/// Every way a todo operation can be refused.
///
/// These are recoverable: callers surface them through
/// [`TodoResponse`](crate::response::TodoResponse) and retry with corrected input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    #[error("invalid todo list: {0}")]
    Validation(String),

    #[error("item {order} is out of range (list has {len} items)")]
    Range { order: usize, len: usize },

    #[error("cannot check item {order}: item {blocking} is not checked yet")]
    OrderViolation { order: usize, blocking: usize },

    #[error("item {order} is already checked")]
    AlreadyChecked { order: usize },

    #[error("item {order} is not checked")]
    NotChecked { order: usize },

    #[error("no active todo list")]
    NoActiveList,

    #[error("failed to persist todo list: {0}")]
    Persistence(String),
}

impl TodoError {
    /// Stable machine-readable kind.
    pub fn kind(&self) -> &'static str {
        match self {
            TodoError::Validation(_) => "validation_error",
            TodoError::Range { .. } => "range_error",
            TodoError::OrderViolation { .. } => "order_violation",
            TodoError::AlreadyChecked { .. } => "already_checked",
            TodoError::NotChecked { .. } => "not_checked",
            TodoError::NoActiveList => "no_active_list",
            TodoError::Persistence(_) => "persistence_error",
        }
    }

    /// Wrap an `io` layer failure, keeping its full context chain.
    pub fn persistence(err: anyhow::Error) -> Self {
        TodoError::Persistence(format!("{err:#}"))
    }
}
