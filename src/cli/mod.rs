//! # Command-Line Interface
//!
//! User-facing commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `add` | Queue a task with priority, dependencies and due date |
//! | `list` | Pending tasks by priority, then due date |
//! | `done` | Complete a pending task by name |
//! | `next` | Highest-priority task, if its dependencies are done |
//! | `status` | Counts and completed names |
//! | `shell` | Interactive numbered menu |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output:
//! ```bash
//! taskq --verbose next
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod task;
mod shell;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};
