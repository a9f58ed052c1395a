//! In-memory task board
//!
//! Pairs the pending queue with the set of completed names and answers
//! which task may run next. Persistence lives in the storage layer.

use super::queue::PendingQueue;
use super::task::{CompletedSet, Priority, Task, ValidationError};

/// Result of looking at the head of the queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextTask {
    /// Nothing is pending
    Empty,
    /// The head task waits on dependencies that are not completed
    Blocked { task: Task, missing: Vec<String> },
    /// The head task can run
    Ready(Task),
}

impl NextTask {
    /// Returns the runnable task, if any
    pub fn ready(&self) -> Option<&Task> {
        match self {
            NextTask::Ready(task) => Some(task),
            _ => None,
        }
    }
}

/// Pending tasks plus completed names
#[derive(Debug, Clone, Default)]
pub struct TaskBoard {
    pending: PendingQueue,
    completed: CompletedSet,
}

impl TaskBoard {
    /// Creates an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a board from persisted parts, in any order
    pub fn from_parts(
        pending: impl IntoIterator<Item = Task>,
        completed: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            pending: PendingQueue::from_tasks(pending),
            completed: completed.into_iter().collect(),
        }
    }

    /// Validates and queues a new task
    ///
    /// Names are not checked for uniqueness.
    pub fn add_task(
        &mut self,
        name: &str,
        priority: Priority,
        dependencies: Option<Vec<String>>,
        due_date: Option<String>,
    ) -> Result<Task, ValidationError> {
        let task = Task::new(name, priority, dependencies, due_date)?;
        self.pending.push(task.clone());
        Ok(task)
    }

    /// Pending tasks ordered by priority then due date (absent first)
    pub fn list_pending(&self) -> Vec<Task> {
        self.pending.sorted_for_display()
    }

    /// Removes the named task from pending and records it as completed
    ///
    /// Returns false, with no change, if no pending task has that name.
    pub fn complete_task(&mut self, name: &str) -> bool {
        match self.pending.remove_first_named(name) {
            Some(task) => {
                self.completed.insert(task.name);
                true
            }
            None => false,
        }
    }

    /// Inspects only the head of the queue
    ///
    /// A blocked head is reported as blocked even if a task further back
    /// could run.
    pub fn next_eligible_task(&self) -> NextTask {
        match self.pending.peek() {
            None => NextTask::Empty,
            Some(task) if task.is_executable(&self.completed) => NextTask::Ready(task.clone()),
            Some(task) => NextTask::Blocked {
                task: task.clone(),
                missing: task.missing_dependencies(&self.completed),
            },
        }
    }

    pub fn pending(&self) -> &PendingQueue {
        &self.pending
    }

    pub fn completed(&self) -> &CompletedSet {
        &self.completed
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_completed(&self, name: &str) -> bool {
        self.completed.contains(name)
    }

    /// Returns true if the name is used by a pending or completed task
    pub fn name_in_use(&self, name: &str) -> bool {
        self.is_completed(name) || self.pending.contains_name(name)
    }
}
