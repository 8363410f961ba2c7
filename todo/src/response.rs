//! Response envelope returned to callers of the command surface.

use serde::{Deserialize, Serialize};

use crate::core::types::TodoList;
use crate::error::TodoError;
use crate::manager::TodoOutcome;

/// `{ "success", "error"?, "list"?, "message"? }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<TodoList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl TodoResponse {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            list: None,
            message: None,
        }
    }
}

impl From<Result<TodoOutcome, TodoError>> for TodoResponse {
    fn from(result: Result<TodoOutcome, TodoError>) -> Self {
        match result {
            Ok(outcome) => Self {
                success: true,
                error: None,
                list: outcome.list,
                message: Some(outcome.message),
            },
            Err(err) => Self::failure(err.to_string()),
        }
    }
}
