//! Task domain model
//!
//! A task is an immutable value: a name, an integer priority (lower runs
//! first), the names of tasks it waits on, and an optional free-form due date.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Set of completed task names, used as the dependency oracle
pub type CompletedSet = BTreeSet<String>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Task name cannot be empty")]
    EmptyName,

    #[error("Priority must be an integer, got '{0}'")]
    NonIntegerPriority(String),
}

/// Task priority; lower values take precedence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priority(i64);

impl Priority {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for Priority {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| ValidationError::NonIntegerPriority(s.to_string()))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A pending unit of work
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Task {
    /// Lookup key and the token other tasks list as a dependency
    pub name: String,

    pub priority: Priority,

    /// Names that must be completed before this task can run
    #[serde(default, deserialize_with = "null_as_empty")]
    pub dependencies: Vec<String>,

    /// Free-form date string, only used to order listings
    #[serde(default)]
    pub due_date: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Task {
    /// Creates a task, rejecting names that are blank after trimming
    pub fn new(
        name: impl Into<String>,
        priority: Priority,
        dependencies: Option<Vec<String>>,
        due_date: Option<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }

        Ok(Self {
            name,
            priority,
            dependencies: dependencies.unwrap_or_default(),
            due_date,
        })
    }

    /// Returns true if every dependency is in the completed set
    pub fn is_executable(&self, completed: &CompletedSet) -> bool {
        self.dependencies.iter().all(|dep| completed.contains(dep))
    }

    /// Dependencies not yet completed, in declared order
    pub fn missing_dependencies(&self, completed: &CompletedSet) -> Vec<String> {
        self.dependencies
            .iter()
            .filter(|dep| !completed.contains(*dep))
            .cloned()
            .collect()
    }

    /// Due date key for listings; absent sorts with the empty string
    pub fn due_sort_key(&self) -> &str {
        self.due_date.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed(names: &[&str]) -> CompletedSet {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn blank_names_are_rejected() {
        assert_eq!(
            Task::new("", Priority::new(1), None, None),
            Err(ValidationError::EmptyName)
        );
        assert_eq!(
            Task::new("   ", Priority::new(1), None, None),
            Err(ValidationError::EmptyName)
        );
    }

    #[test]
    fn dependencies_default_to_empty() {
        let task = Task::new("build", Priority::new(1), None, None).unwrap();
        assert!(task.dependencies.is_empty());
        assert!(task.is_executable(&CompletedSet::new()));
    }

    #[test]
    fn priority_parsing() {
        assert_eq!("3".parse::<Priority>(), Ok(Priority::new(3)));
        assert_eq!(" -2 ".parse::<Priority>(), Ok(Priority::new(-2)));
        assert!(matches!(
            "1.5".parse::<Priority>(),
            Err(ValidationError::NonIntegerPriority(_))
        ));
        assert!("high".parse::<Priority>().is_err());
    }

    #[test]
    fn out_of_range_priority_is_rejected() {
        assert!(matches!(
            "9223372036854775808".parse::<Priority>(),
            Err(ValidationError::NonIntegerPriority(_))
        ));
        assert_eq!(
            "9223372036854775807".parse::<Priority>(),
            Ok(Priority::new(i64::MAX))
        );
    }

    #[test]
    fn executability_tracks_completed_set() {
        let task = Task::new(
            "deploy",
            Priority::new(2),
            Some(vec!["build".into(), "test".into()]),
            None,
        )
        .unwrap();

        assert!(!task.is_executable(&completed(&[])));
        assert!(!task.is_executable(&completed(&["build"])));
        assert_eq!(task.missing_dependencies(&completed(&["build"])), vec!["test"]);
        assert!(task.is_executable(&completed(&["build", "test"])));
    }

    #[test]
    fn null_dependencies_deserialize_as_empty() {
        let json = r#"{"name":"a","priority":1,"dependencies":null,"due_date":null}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(task.dependencies.is_empty());
        assert!(task.due_date.is_none());
    }

    #[test]
    fn fractional_priority_is_malformed_json() {
        let json = r#"{"name":"a","priority":1.5,"dependencies":[]}"#;
        assert!(serde_json::from_str::<Task>(json).is_err());
    }
}
