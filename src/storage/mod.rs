//! # Storage Layer
//!
//! Persistence for the task board.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Tasks | JSON document | `tasks.json` (configurable) |
//! | Project config | TOML | `./.taskq.toml` |
//! | Global config | TOML | `~/.config/taskq/config.toml` |
//!
//! ## Consistency
//!
//! - The store is read once by [`TaskStore::load`] and rewritten after every
//!   mutation; the last writer wins
//! - Writes are atomic for a single writer (temp file + rename)
//! - A failed save leaves the in-memory board ahead of the file
//!
//! ## Key Types
//!
//! - [`TaskStore`] - Board bound to its backing file
//! - [`StateFile`] - Read/write the JSON document
//! - [`Config`] - Project and global configuration

mod state;
mod store;
mod config;

pub use state::{PersistedState, PersistenceError, StateFile};
pub use store::{StoreError, TaskStore};
pub use config::{Config, ConfigError, FileConfig, OutputFormat, DEFAULT_STORE_FILE, PROJECT_CONFIG_FILE};
