//! Development-time tracing for debugging todo operations.
//!
//! # Separation of Concerns
//!
//! - **Tracing (this module)**: Dev diagnostics via `RUST_LOG`, written to
//!   stderr. Silent at the default `warn` level unless a todo file is
//!   unreadable or the project path cannot be resolved.
//!
//! - **Command output (`main.rs`)**: Messages, list renderings and `--json`
//!   envelopes go to stdout, so piping `--json` output never picks up log
//!   lines. Refusals and load warnings are printed to stderr as plain text.
//!
//! - **Todo file (`io/todo_store`)**: The only persisted state. Written on
//!   every mutation regardless of `RUST_LOG`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global stderr subscriber.
///
/// The filter comes from `RUST_LOG` and falls back to `warn`.
///
/// # Example
/// ```bash
/// RUST_LOG=loom_todo=debug loom-todo check 2
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
