use super::task::{Priority, Task, TaskId, local_date_today, seed_tasks};
use crate::error::ValidationError;
use chrono::NaiveDate;

/// A single state transition on the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Add {
        text: String,
        priority: Priority,
        due: Option<NaiveDate>,
    },
    Toggle {
        id: TaskId,
    },
    StartEdit {
        id: TaskId,
    },
    CommitEdit {
        id: TaskId,
        text: String,
        priority: Priority,
        due: NaiveDate,
    },
    CancelEdit {
        id: TaskId,
    },
    Remove {
        id: TaskId,
    },
    Reorder {
        from: usize,
        to: usize,
    },
}

/// Ordered collection of tasks, the single source of truth
///
/// Every operation borrows the current store and returns the next one;
/// callers swap the result in. Operations addressing a missing id return an
/// unchanged copy instead of failing, so stale requests are harmless.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TodoStore {
    tasks: Vec<Task>,

    /// Highest id ever handed out or loaded, kept so ids of removed tasks are
    /// not reused within the lifetime of this store
    last_id: TaskId,
}

impl TodoStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the fixed seed list
    pub fn seeded() -> Self {
        Self::from_tasks(seed_tasks())
    }

    /// Create a store from already-validated tasks, keeping their order
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let last_id = tasks.iter().map(|t| t.id).max().unwrap_or(0);
        Self { tasks, last_id }
    }

    /// Tasks in display order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Find a task by its ID
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.get(id).is_some()
    }

    /// Position of a task in display order
    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// The id the next `add` will assign, `None` once the id space is used up
    pub fn next_id(&self) -> Option<TaskId> {
        self.last_id.checked_add(1)
    }

    /// Append a new pending task
    ///
    /// # Arguments
    /// * `text` - Task description, rejected when blank
    /// * `priority` - Task priority
    /// * `due` - Due date, today when `None`
    ///
    /// # Returns
    /// The next store, or a `ValidationError` with nothing changed
    pub fn add(
        &self,
        text: &str,
        priority: Priority,
        due: Option<NaiveDate>,
    ) -> Result<Self, ValidationError> {
        validate_text(text)?;

        let id = self.next_id().ok_or(ValidationError::IdsExhausted)?;
        let mut next = self.clone();
        next.tasks.push(Task::new(
            id,
            text,
            priority,
            due.unwrap_or_else(local_date_today),
        ));
        next.last_id = id;
        Ok(next)
    }

    /// Flip the completion flag of a task
    pub fn toggle(&self, id: TaskId) -> Self {
        self.map_task(id, |task| task.done = !task.done)
    }

    /// Mark a task as being edited
    pub fn start_edit(&self, id: TaskId) -> Self {
        self.map_task(id, |task| task.editing = true)
    }

    /// Leave edit mode without changing any field
    pub fn cancel_edit(&self, id: TaskId) -> Self {
        self.map_task(id, |task| task.editing = false)
    }

    /// Replace text, priority and due date of a task and leave edit mode
    ///
    /// Blank text is rejected the same way `add` rejects it.
    pub fn commit_edit(
        &self,
        id: TaskId,
        text: &str,
        priority: Priority,
        due: NaiveDate,
    ) -> Result<Self, ValidationError> {
        validate_text(text)?;

        Ok(self.map_task(id, |task| {
            task.text = text.to_string();
            task.priority = priority;
            task.due = due;
            task.editing = false;
        }))
    }

    /// Remove a task, keeping the order of the others
    pub fn remove(&self, id: TaskId) -> Self {
        let mut next = self.clone();
        next.tasks.retain(|t| t.id != id);
        next
    }

    /// Move the task at `from` to index `to`, shifting the tasks in between
    ///
    /// Out-of-range or equal indices leave the order untouched.
    pub fn reorder(&self, from: usize, to: usize) -> Self {
        let mut next = self.clone();
        let len = next.tasks.len();
        if from == to || from >= len || to >= len {
            return next;
        }

        let task = next.tasks.remove(from);
        next.tasks.insert(to, task);
        next
    }

    /// Apply one operation
    pub fn apply(&self, operation: Operation) -> Result<Self, ValidationError> {
        match operation {
            Operation::Add {
                text,
                priority,
                due,
            } => self.add(&text, priority, due),
            Operation::Toggle { id } => Ok(self.toggle(id)),
            Operation::StartEdit { id } => Ok(self.start_edit(id)),
            Operation::CommitEdit {
                id,
                text,
                priority,
                due,
            } => self.commit_edit(id, &text, priority, due),
            Operation::CancelEdit { id } => Ok(self.cancel_edit(id)),
            Operation::Remove { id } => Ok(self.remove(id)),
            Operation::Reorder { from, to } => Ok(self.reorder(from, to)),
        }
    }

    fn map_task(&self, id: TaskId, f: impl FnOnce(&mut Task)) -> Self {
        let mut next = self.clone();
        if let Some(task) = next.tasks.iter_mut().find(|t| t.id == id) {
            f(task);
        }
        next
    }
}

fn validate_text(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::EmptyText);
    }
    Ok(())
}
