//! Stable exit codes for the `loom-todo` CLI.

/// Operation succeeded.
pub const OK: i32 = 0;
/// Invalid invocation, configuration, command line, or other unexpected error.
pub const INVALID: i32 = 1;
/// The operation was refused (validation, range, ordering, or persistence).
pub const REJECTED: i32 = 2;
/// There is no active todo list to operate on.
pub const NO_ACTIVE_LIST: i32 = 3;
