//! Interactive menu
//!
//! A numbered menu over the store. Every error kind is reported and the loop
//! continues; only end of input or an I/O failure on the terminal ends it.

use std::io::{BufRead, Write};

use anyhow::Result;

use super::output::describe_task;
use super::task::parse_dependency_list;
use crate::domain::{NextTask, Priority};
use crate::storage::{StoreError, TaskStore};

const MENU: &str = "\nTask Manager
1. Add task
2. Show pending tasks
3. Complete task
4. Show next task
5. Exit";

/// Runs the menu until the user exits or input ends
pub fn run<R: BufRead, W: Write>(store: &mut TaskStore, input: &mut R, out: &mut W) -> Result<()> {
    loop {
        writeln!(out, "{}", MENU)?;
        let Some(choice) = prompt(input, out, "Choose an option: ")? else {
            return Ok(());
        };

        match choice.trim() {
            "1" => {
                if !add(store, input, out)? {
                    return Ok(());
                }
            }
            "2" => list(store, out)?,
            "3" => {
                let Some(name) = prompt(input, out, "Task name to complete: ")? else {
                    return Ok(());
                };
                match store.complete_task(&name) {
                    Ok(true) => writeln!(out, "Completed task: {}", name)?,
                    Ok(false) => writeln!(out, "Task '{}' not found.", name)?,
                    Err(e) => report(out, &e)?,
                }
            }
            "4" => next(store, out)?,
            "5" => return Ok(()),
            other => writeln!(out, "Invalid option: '{}'", other)?,
        }
    }
}

/// Reads one trimmed line; `None` at end of input
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> Result<Option<String>> {
    write!(out, "{}", label)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Returns false if input ended mid-form
fn add<R: BufRead, W: Write>(store: &mut TaskStore, input: &mut R, out: &mut W) -> Result<bool> {
    let Some(name) = prompt(input, out, "Task name: ")? else {
        return Ok(false);
    };
    let Some(priority) = prompt(input, out, "Priority (integer, lower runs first): ")? else {
        return Ok(false);
    };
    let Some(deps) = prompt(input, out, "Dependencies (comma separated, optional): ")? else {
        return Ok(false);
    };
    let Some(due) = prompt(input, out, "Due date (optional, YYYY-MM-DD): ")? else {
        return Ok(false);
    };

    let priority: Priority = match priority.parse() {
        Ok(priority) => priority,
        Err(e) => {
            report(out, &StoreError::from(e))?;
            return Ok(true);
        }
    };
    let deps = parse_dependency_list(&deps);
    let deps = (!deps.is_empty()).then_some(deps);
    let due = (!due.is_empty()).then_some(due);

    match store.add_task(&name, priority, deps, due) {
        Ok(task) => writeln!(out, "Added task: {}", task.name)?,
        Err(e) => report(out, &e)?,
    }
    Ok(true)
}

fn list<W: Write>(store: &TaskStore, out: &mut W) -> Result<()> {
    let tasks = store.list_pending();
    if tasks.is_empty() {
        writeln!(out, "No pending tasks.")?;
    }
    for task in &tasks {
        writeln!(out, "{}", describe_task(task))?;
    }
    Ok(())
}

fn next<W: Write>(store: &TaskStore, out: &mut W) -> Result<()> {
    match store.next_eligible_task() {
        NextTask::Empty => writeln!(out, "No pending tasks.")?,
        NextTask::Blocked { task, missing } => writeln!(
            out,
            "Next task '{}' is blocked by dependencies: {}",
            task.name,
            missing.join(", ")
        )?,
        NextTask::Ready(task) => writeln!(out, "Next task: {}", describe_task(&task))?,
    }
    Ok(())
}

fn report<W: Write>(out: &mut W, err: &StoreError) -> Result<()> {
    match err {
        StoreError::Validation(e) => writeln!(out, "Invalid input: {}", e)?,
        StoreError::Persistence(e) => {
            writeln!(out, "Warning: change applied but not saved: {}", e)?;
            if let Some(source) = std::error::Error::source(e) {
                writeln!(out, "  caused by: {}", source)?;
            }
        }
    }
    Ok(())
}
