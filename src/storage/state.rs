//! JSON state file
//!
//! The whole board is stored as one JSON document:
//!
//! ```json
//! {"tasks": [[1, {"name": "build", "priority": 1, "dependencies": [], "due_date": null}]],
//!  "completed_tasks": ["setup"]}
//! ```
//!
//! `tasks` holds `[priority, task]` pairs in heap order, not sorted; loaders
//! must re-heapify. A missing file reads as an empty board.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Priority, Task, TaskBoard};

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to read task store {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Task store {path} is malformed")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize task store")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to write task store {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to lock task store {path}")]
    Lock {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// On-disk shape of the board
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub tasks: Vec<(Priority, Task)>,

    #[serde(default)]
    pub completed_tasks: Vec<String>,
}

impl PersistedState {
    /// Snapshot of a board, pending tasks in queue-internal order
    pub fn from_board(board: &TaskBoard) -> Self {
        Self {
            tasks: board
                .pending()
                .iter()
                .map(|task| (task.priority, task.clone()))
                .collect(),
            completed_tasks: board.completed().iter().cloned().collect(),
        }
    }

    /// Rebuilds the board; the pair's priority is the queue key
    pub fn into_board(self) -> TaskBoard {
        let pending = self.tasks.into_iter().map(|(priority, mut task)| {
            task.priority = priority;
            task
        });
        TaskBoard::from_parts(pending, self.completed_tasks)
    }
}

/// A JSON file holding the board
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the state; a missing file is an empty state
    pub fn read(&self) -> Result<PersistedState, PersistenceError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(PersistedState::default())
            }
            Err(source) => {
                return Err(PersistenceError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        file.lock_shared().map_err(|source| PersistenceError::Lock {
            path: self.path.clone(),
            source,
        })?;

        // Lock is released when file is dropped
        serde_json::from_reader(BufReader::new(&file)).map_err(|source| {
            PersistenceError::Malformed {
                path: self.path.clone(),
                source,
            }
        })
    }

    /// Replaces the file contents via temp file and rename
    pub fn write(&self, state: &PersistedState) -> Result<(), PersistenceError> {
        let write_err = |source| PersistenceError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let temp_path = self.temp_path();

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .map_err(write_err)?;

            file.lock_exclusive()
                .map_err(|source| PersistenceError::Lock {
                    path: temp_path.clone(),
                    source,
                })?;

            let mut writer = BufWriter::new(&file);
            serde_json::to_writer(&mut writer, state).map_err(PersistenceError::Serialize)?;
            writer.flush().map_err(write_err)?;
        }

        fs::rename(&temp_path, &self.path).map_err(write_err)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
