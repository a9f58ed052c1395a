//! Domain models for taskq
//!
//! Contains the queue and dependency logic without any I/O concerns.

mod task;
mod queue;
mod board;

pub use task::{CompletedSet, Priority, Task, ValidationError};
pub use queue::PendingQueue;
pub use board::{NextTask, TaskBoard};
