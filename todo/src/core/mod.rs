//! Deterministic, pure logic for todo lists.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! lists and take the current time as an argument so tests stay deterministic.

pub mod invariants;
pub mod rules;
pub mod status;
pub mod types;
