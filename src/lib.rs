//! taskq - A local-first priority task queue
//!
//! Pending tasks are kept in a min-priority queue; a task may run once every
//! task it depends on has been completed. State lives in a single JSON file
//! that is rewritten after every change.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{NextTask, Priority, Task, TaskBoard, ValidationError};
pub use storage::{StoreError, TaskStore};
