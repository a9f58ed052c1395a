//! Task commands (add, list, done, next, status)

use anyhow::{Context, Result};

use super::output::{describe_task, Output};
use crate::domain::{NextTask, Priority};
use crate::storage::TaskStore;

/// Splits `a, b,,c` into trimmed, non-empty names
pub fn parse_dependency_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|dep| !dep.is_empty())
        .map(String::from)
        .collect()
}

pub fn add(
    store: &mut TaskStore,
    output: &Output,
    name: &str,
    priority: &str,
    dependencies: Vec<String>,
    due_date: Option<String>,
) -> Result<()> {
    let priority: Priority = priority.parse()?;
    let due_date = due_date.filter(|d| !d.trim().is_empty());

    if store.name_in_use(name) {
        output.warn(&format!(
            "a task named '{}' already exists; names are not unique",
            name
        ));
    }

    output.verbose_ctx(
        "add",
        &format!("Adding '{}' with priority {} and {} dependencies", name, priority, dependencies.len()),
    );
    let dependencies = (!dependencies.is_empty()).then_some(dependencies);
    let task = store
        .add_task(name, priority, dependencies, due_date)
        .context("Failed to add task")?;
    output.verbose_ctx("save", &format!("Saved {}", store.path().display()));

    if output.is_json() {
        output.data(&task);
    } else {
        output.success(&format!("Added task: {} (priority {})", task.name, task.priority));
    }

    Ok(())
}

pub fn list(store: &TaskStore, output: &Output) -> Result<()> {
    let tasks = store.list_pending();
    output.verbose_ctx("list", &format!("{} pending tasks", tasks.len()));

    if output.is_json() {
        output.data(&tasks);
    } else if tasks.is_empty() {
        println!("No pending tasks.");
    } else {
        for task in &tasks {
            println!("{}", describe_task(task));
        }
    }

    Ok(())
}

pub fn done(store: &mut TaskStore, output: &Output, name: &str) -> Result<()> {
    output.verbose_ctx(
        "done",
        &format!("Scanning {} pending tasks for '{}'", store.pending_len(), name),
    );
    let found = store
        .complete_task(name)
        .context("Failed to complete task")?;
    output.verbose_ctx("save", &format!("Saved {}", store.path().display()));

    if output.is_json() {
        output.data(&serde_json::json!({
            "name": name,
            "completed": found,
        }));
    } else if found {
        output.success(&format!("Completed task: {}", name));
    } else {
        println!("Task '{}' not found.", name);
    }

    Ok(())
}

pub fn next(store: &TaskStore, output: &Output) -> Result<()> {
    let next = store.next_eligible_task();

    if output.is_json() {
        let value = match &next {
            NextTask::Empty => serde_json::json!({ "state": "empty" }),
            NextTask::Blocked { task, missing } => serde_json::json!({
                "state": "blocked",
                "task": task,
                "missing": missing,
            }),
            NextTask::Ready(task) => serde_json::json!({
                "state": "ready",
                "task": task,
            }),
        };
        output.data(&value);
        return Ok(());
    }

    match next {
        NextTask::Empty => println!("No pending tasks."),
        NextTask::Blocked { task, missing } => {
            println!(
                "Next task '{}' is blocked by dependencies: {}",
                task.name,
                missing.join(", ")
            );
        }
        NextTask::Ready(task) => println!("Next task: {}", describe_task(&task)),
    }

    Ok(())
}

pub fn status(store: &TaskStore, output: &Output) -> Result<()> {
    let next = store.next_eligible_task();
    let head_state = match &next {
        NextTask::Empty => "empty",
        NextTask::Blocked { .. } => "blocked",
        NextTask::Ready(_) => "ready",
    };

    if output.is_json() {
        output.data(&serde_json::json!({
            "store": store.path().display().to_string(),
            "pending": store.pending_len(),
            "completed": store.completed().len(),
            "head": head_state,
            "completed_tasks": store.completed(),
        }));
    } else {
        println!("Store: {}", store.path().display());
        println!("{}", "=".repeat(40));
        println!("  Pending:   {}", store.pending_len());
        println!("  Completed: {}", store.completed().len());
        println!("  Next task: {}", head_state);

        if !store.completed().is_empty() {
            println!();
            println!("Completed tasks:");
            for name in store.completed() {
                println!("  [x] {}", name);
            }
        }
    }

    Ok(())
}
