//! I/O helpers for todo storage.

pub mod config;
pub mod paths;
pub mod todo_store;
