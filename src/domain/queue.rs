//! Min-priority queue of pending tasks
//!
//! Extraction order is `(priority, insertion sequence)`: equal priorities come
//! out first-in first-out. Due dates play no part here; they only affect
//! [`PendingQueue::sorted_for_display`].

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use super::task::{Priority, Task};

#[derive(Debug, Clone)]
struct Entry {
    seq: u64,
    task: Task,
}

impl Entry {
    fn key(&self) -> (Priority, u64) {
        (self.task.priority, self.seq)
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Priority queue over pending tasks
#[derive(Debug, Clone, Default)]
pub struct PendingQueue {
    heap: BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
}

#[allow(clippy::len_without_is_empty)]
impl PendingQueue {
    /// Creates an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a valid queue from tasks in any order
    ///
    /// Sequence numbers follow the input order, so ties keep that order.
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut next_seq = 0;
        let entries: Vec<_> = tasks
            .into_iter()
            .map(|task| {
                let entry = Entry { seq: next_seq, task };
                next_seq += 1;
                Reverse(entry)
            })
            .collect();

        Self {
            heap: BinaryHeap::from(entries),
            next_seq,
        }
    }

    /// Inserts a task
    pub fn push(&mut self, task: Task) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry { seq, task }));
    }

    /// The task that would be extracted next, without removing it
    pub fn peek(&self) -> Option<&Task> {
        self.heap.peek().map(|Reverse(entry)| &entry.task)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Iterates in the heap's internal array order (not sorted)
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.heap.iter().map(|Reverse(entry)| &entry.task)
    }

    /// Returns true if any pending task carries this name
    pub fn contains_name(&self, name: &str) -> bool {
        self.iter().any(|task| task.name == name)
    }

    /// Display ordering: priority, then due date with absent dates first
    ///
    /// Remaining ties fall back to insertion order.
    pub fn sorted_for_display(&self) -> Vec<Task> {
        let mut entries: Vec<&Entry> = self.heap.iter().map(|Reverse(entry)| entry).collect();
        entries.sort_by(|a, b| {
            a.task
                .priority
                .cmp(&b.task.priority)
                .then_with(|| a.task.due_sort_key().cmp(b.task.due_sort_key()))
                .then_with(|| a.seq.cmp(&b.seq))
        });
        entries.into_iter().map(|entry| entry.task.clone()).collect()
    }

    /// Removes the first task with `name` in extraction order
    ///
    /// A binary heap has no keyed removal, so every entry is popped, the
    /// first match dropped, and the rest pushed back with their original
    /// sequence numbers. O(n log n) in the queue length.
    pub fn remove_first_named(&mut self, name: &str) -> Option<Task> {
        let mut remaining = Vec::with_capacity(self.heap.len());
        let mut removed = None;

        while let Some(Reverse(entry)) = self.heap.pop() {
            if removed.is_none() && entry.task.name == name {
                removed = Some(entry.task);
            } else {
                remaining.push(Reverse(entry));
            }
        }

        for entry in remaining {
            self.heap.push(entry);
        }

        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(name: &str, priority: i64) -> Task {
        Task::new(name, Priority::new(priority), None, None).unwrap()
    }

    fn dated(name: &str, priority: i64, due: Option<&str>) -> Task {
        Task::new(name, Priority::new(priority), None, due.map(String::from)).unwrap()
    }

    fn drain_names(mut queue: PendingQueue) -> Vec<String> {
        let mut names = Vec::new();
        while let Some(first) = queue.peek().map(|t| t.name.clone()) {
            queue.remove_first_named(&first);
            names.push(first);
        }
        names
    }

    #[test]
    fn peek_returns_lowest_priority() {
        let mut queue = PendingQueue::new();
        queue.push(task("c", 3));
        queue.push(task("a", -1));
        queue.push(task("b", 2));

        assert_eq!(queue.peek().unwrap().name, "a");
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn equal_priorities_extract_in_insertion_order() {
        let mut queue = PendingQueue::new();
        queue.push(dated("late", 5, Some("2024-01-01")));
        queue.push(dated("undated", 5, None));

        // Due date does not influence extraction
        assert_eq!(queue.peek().unwrap().name, "late");
        assert_eq!(drain_names(queue), vec!["late", "undated"]);
    }

    #[test]
    fn display_order_uses_due_date() {
        let mut queue = PendingQueue::new();
        queue.push(dated("late", 5, Some("2024-01-01")));
        queue.push(dated("undated", 5, None));
        queue.push(dated("urgent", 1, Some("2030-12-31")));

        let names: Vec<_> = queue
            .sorted_for_display()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["urgent", "undated", "late"]);
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn remove_arbitrary_task_keeps_heap_valid() {
        let mut queue = PendingQueue::new();
        for (i, name) in ["a", "b", "c", "d", "e"].iter().enumerate() {
            queue.push(task(name, (5 - i) as i64));
        }

        let removed = queue.remove_first_named("c").unwrap();
        assert_eq!(removed.name, "c");
        assert_eq!(queue.len(), 4);
        assert_eq!(drain_names(queue), vec!["e", "d", "b", "a"]);
    }

    #[test]
    fn remove_missing_name_changes_nothing() {
        let mut queue = PendingQueue::new();
        queue.push(task("a", 1));
        queue.push(task("b", 2));

        assert!(queue.remove_first_named("zzz").is_none());
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.peek().unwrap().name, "a");
    }

    #[test]
    fn duplicate_names_remove_only_first_in_pop_order() {
        let mut queue = PendingQueue::new();
        queue.push(task("dup", 7));
        queue.push(task("dup", 3));

        let removed = queue.remove_first_named("dup").unwrap();
        assert_eq!(removed.priority, Priority::new(3));
        assert_eq!(queue.len(), 1);
        assert!(queue.contains_name("dup"));
    }

    #[test]
    fn from_tasks_heapifies_unsorted_input() {
        let queue = PendingQueue::from_tasks(vec![task("x", 9), task("y", 1), task("z", 4)]);
        assert_eq!(queue.peek().unwrap().name, "y");
        assert_eq!(drain_names(queue), vec!["y", "z", "x"]);
    }

    #[test]
    fn removed_and_reinserted_entries_keep_tie_order() {
        let mut queue = PendingQueue::new();
        queue.push(task("first", 1));
        queue.push(task("second", 1));
        queue.push(task("gone", 0));

        queue.remove_first_named("gone");
        queue.push(task("third", 1));

        assert_eq!(drain_names(queue), vec!["first", "second", "third"]);
    }
}
