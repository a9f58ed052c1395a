//! Persistent task store
//!
//! Loads the board once on construction and rewrites the whole file after
//! every mutation. There is no locking between operations: concurrent
//! writers race and the last save wins.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::state::{PersistedState, PersistenceError, StateFile};
use crate::domain::{CompletedSet, NextTask, Priority, Task, TaskBoard, ValidationError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Task board bound to a backing file
pub struct TaskStore {
    board: TaskBoard,
    file: StateFile,
}

impl TaskStore {
    /// Loads the store at `path`, starting empty if the file is absent
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let file = StateFile::new(path);
        let board = file.read()?.into_board();
        Ok(Self { board, file })
    }

    /// Returns the path to the store file
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Writes the current board to disk
    pub fn save(&self) -> Result<(), StoreError> {
        self.file.write(&PersistedState::from_board(&self.board))?;
        Ok(())
    }

    /// Adds a task and saves
    ///
    /// On validation failure nothing changes. On save failure the task is
    /// already queued in memory.
    pub fn add_task(
        &mut self,
        name: &str,
        priority: Priority,
        dependencies: Option<Vec<String>>,
        due_date: Option<String>,
    ) -> Result<Task, StoreError> {
        let task = self.board.add_task(name, priority, dependencies, due_date)?;
        self.save()?;
        Ok(task)
    }

    /// Pending tasks in display order
    pub fn list_pending(&self) -> Vec<Task> {
        self.board.list_pending()
    }

    /// Completes the first pending task named `name`
    ///
    /// Saves even when nothing matched.
    pub fn complete_task(&mut self, name: &str) -> Result<bool, StoreError> {
        let found = self.board.complete_task(name);
        self.save()?;
        Ok(found)
    }

    /// Checks the head of the queue
    pub fn next_eligible_task(&self) -> NextTask {
        self.board.next_eligible_task()
    }

    pub fn completed(&self) -> &CompletedSet {
        self.board.completed()
    }

    pub fn pending_len(&self) -> usize {
        self.board.pending_len()
    }

    pub fn name_in_use(&self, name: &str) -> bool {
        self.board.name_in_use(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs;
    use tempfile::TempDir;

    fn p(value: i64) -> Priority {
        Priority::new(value)
    }

    fn store_in(dir: &TempDir) -> TaskStore {
        TaskStore::load(dir.path().join("tasks.json")).unwrap()
    }

    #[test]
    fn absent_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.pending_len(), 0);
        assert!(store.completed().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn corrupt_file_fails_to_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(&path, "not json").unwrap();

        let result = TaskStore::load(&path);
        assert!(matches!(result, Err(StoreError::Persistence(_))));
    }

    #[test]
    fn add_task_saves_immediately() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        store.add_task("build", p(1), None, None).unwrap();
        assert!(store.path().exists());

        let reloaded = store_in(&dir);
        assert_eq!(reloaded.pending_len(), 1);
    }

    #[test]
    fn validation_errors_do_not_touch_disk() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        let err = store.add_task("", p(1), None, None).unwrap_err();
        assert!(matches!(err, StoreError::Validation(ValidationError::EmptyName)));
        assert!(!store.path().exists());
    }

    #[test]
    fn complete_unknown_still_saves() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        assert!(!store.complete_task("nothing").unwrap());
        assert!(store.path().exists());
        assert_eq!(store.pending_len(), 0);
        assert!(store.completed().is_empty());
    }

    #[test]
    fn round_trip_reproduces_pending_and_completed() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        store.add_task("a", p(3), None, None).unwrap();
        store
            .add_task("b", p(-1), Some(vec!["a".into()]), Some("2024-02-02".into()))
            .unwrap();
        store.add_task("c", p(3), None, Some("2023-12-31".into())).unwrap();
        store.add_task("d", p(0), None, None).unwrap();
        assert!(store.complete_task("d").unwrap());

        let reloaded = store_in(&dir);
        let before: HashSet<Task> = store.list_pending().into_iter().collect();
        let after: HashSet<Task> = reloaded.list_pending().into_iter().collect();
        assert_eq!(before, after);
        assert_eq!(store.completed(), reloaded.completed());
    }

    #[test]
    fn completion_persists_across_reload() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.add_task("deploy", p(2), Some(vec!["build".into()]), None).unwrap();
        store.add_task("build", p(1), None, None).unwrap();
        store.complete_task("build").unwrap();

        let reloaded = store_in(&dir);
        assert!(reloaded.completed().contains("build"));
        assert_eq!(
            reloaded.next_eligible_task().ready().map(|t| t.name.as_str()),
            Some("deploy")
        );
    }

    #[test]
    fn save_failure_surfaces_persistence_error() {
        let dir = TempDir::new().unwrap();
        // A directory in place of the file makes the final rename fail
        let path = dir.path().join("tasks.json");
        fs::create_dir_all(path.join("child")).unwrap();

        let mut store = TaskStore {
            board: TaskBoard::new(),
            file: StateFile::new(&path),
        };

        let err = store.add_task("x", p(1), None, None).unwrap_err();
        assert!(matches!(err, StoreError::Persistence(_)));
        // Applied in memory, not durable
        assert_eq!(store.pending_len(), 1);
    }
}
