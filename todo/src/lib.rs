//! Sequential todo list tracker with per-workspace file persistence.
//!
//! A caller declares an ordered list of 2 to 10 steps and advances through
//! them strictly in order. The architecture keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic list rules (sequential check,
//!   cascading uncheck, derived item status). No I/O.
//! - **[`io`]**: Configuration, storage path resolution, and the JSON todo
//!   file.
//!
//! [`manager::TodoListManager`] combines the two: it owns the single list for
//! a workspace and rewrites the todo file after every mutation.
//! [`command`] and [`response`] expose it as a textual command surface with a
//! JSON response envelope.

pub mod command;
pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod manager;
pub mod render;
pub mod response;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
