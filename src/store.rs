//! The task store: the local list of tasks, kept in sync with a remote [`TaskCollection`]
//!
//! The store is never optimistic. Local tasks only change once the remote collection has confirmed a change,
//! and they are then replaced by whatever the collection returned.
//!
//! Every operation takes `&self`, so that several of them can be in flight at the same time (e.g. with `tokio::join!`).
//! Each one applies its own result when it completes, in completion order. In particular, two concurrent updates of the same
//! task end up with the result of the last one to complete, since updates overwrite whole records without any version check.

use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;

use crate::board::{self, Board};
use crate::error::{Error, Operation};
use crate::task::{NewTask, Task, TaskId, TaskStatus};
use crate::traits::TaskCollection;

/// A text edition that has started but not been committed yet
#[derive(Clone, Debug, PartialEq)]
pub struct Edit {
    pub id: TaskId,
    pub text: String,
}

#[derive(Debug, Default)]
struct StoreState {
    tasks: Vec<Task>,
    /// The operation whose failure is currently reported to the user
    failure: Option<Operation>,
    editing: Option<Edit>,
}

/// The local list of tasks, mirrored from (and to) a remote collection
#[derive(Debug)]
pub struct TaskStore<C: TaskCollection> {
    remote: C,
    state: Mutex<StoreState>,
    clock: fn() -> NaiveDate,
}

impl<C: TaskCollection> TaskStore<C> {
    /// Create an empty store. Call [`Self::load`] to fetch the tasks from `remote`
    pub fn new(remote: C) -> Self {
        Self {
            remote,
            state: Mutex::new(StoreState::default()),
            clock: crate::utils::today,
        }
    }

    /// Use a custom function to know the current date (the local date is used by default)
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    pub fn remote(&self) -> &C {
        &self.remote
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    fn state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// The local tasks, in order
    pub fn tasks(&self) -> Vec<Task> {
        self.state().tasks.clone()
    }

    pub fn task(&self, id: &TaskId) -> Option<Task> {
        self.state().tasks.iter().find(|t| t.id() == id).cloned()
    }

    /// Find a task by the textual form of its ID (e.g. as typed by a user)
    pub fn find(&self, id: &str) -> Option<Task> {
        self.state().tasks.iter().find(|t| t.id().to_string() == id).cloned()
    }

    /// The local tasks, split into columns
    pub fn board(&self) -> Board {
        board::partition(&self.state().tasks, self.today())
    }

    /// The message to display, in case the last operation failed
    pub fn error(&self) -> Option<&'static str> {
        self.state().failure.map(|op| op.user_message())
    }

    pub fn failed_operation(&self) -> Option<Operation> {
        self.state().failure
    }

    pub fn clear_error(&self) {
        self.state().failure = None;
    }

    fn start(&self, operation: Operation) {
        log::debug!("Starting a task {}", operation);
        self.state().failure = None;
    }

    /// Report the failure of an operation (if any)
    fn finish<T>(&self, operation: Operation, result: Result<T, Error>) -> Result<T, Error> {
        if let Err(err) = &result {
            log::error!("Unable to {} task(s): {}", operation, err);
            self.state().failure = Some(operation);
        }
        result
    }

    /// Replace the local tasks with the content of the remote collection.
    ///
    /// In case of failure, the local tasks are left as they were.
    pub async fn load(&self) -> Result<(), Error> {
        self.start(Operation::Load);
        let result = self.remote.get_tasks().await;
        let tasks = self.finish(Operation::Load, result)?;

        log::info!("Loaded {} tasks", tasks.len());
        self.state().tasks = tasks;
        Ok(())
    }

    /// Validate a new task, have the remote collection create it, and append it to the local tasks.
    ///
    /// Invalid drafts (empty text, start date after end date) are rejected without sending anything.
    pub async fn create(&self, new_task: NewTask) -> Result<Task, Error> {
        self.start(Operation::Create);
        let draft = match new_task.validate(self.today()) {
            Ok(draft) => draft,
            Err(err) => return self.finish(Operation::Create, Err(err.into())),
        };

        let result = self.remote.create_task(&draft).await;
        let created = self.finish(Operation::Create, result)?;

        log::info!("Created task {}", created.id());
        self.state().tasks.push(created.clone());
        Ok(created)
    }

    /// Send the whole task to the remote collection, and replace the local task that has the same ID with the result.
    ///
    /// This overwrites whatever the collection stored for this task, including changes made by other clients.
    pub async fn update(&self, task: Task) -> Result<Task, Error> {
        self.start(Operation::Update);
        let id = task.id().clone();

        let result = self.remote.update_task(&task).await;
        let updated = self.finish(Operation::Update, result)?;

        let mut state = self.state();
        match state.tasks.iter_mut().find(|t| t.id() == &id) {
            Some(local) => *local = updated.clone(),
            None => log::warn!("Task {} has been removed while it was updated. Ignoring the update", id),
        }
        Ok(updated)
    }

    /// Delete a task from the remote collection, then from the local tasks
    pub async fn delete(&self, id: &TaskId) -> Result<(), Error> {
        self.start(Operation::Delete);
        let result = self.remote.delete_task(id).await;
        self.finish(Operation::Delete, result)?;

        log::info!("Deleted task {}", id);
        self.state().tasks.retain(|t| t.id() != id);
        Ok(())
    }

    /// Move a task to another column. See [`Task::move_to`]
    pub async fn move_status(&self, task: &Task, new_status: TaskStatus) -> Result<Task, Error> {
        let mut moved = task.clone();
        moved.move_to(new_status, self.today());
        self.update(moved).await
    }

    /// Mark a to-do task as done, or a done task as to-do
    pub async fn toggle_status(&self, task: &Task) -> Result<Task, Error> {
        self.move_status(task, task.status().opposite()).await
    }

    /// Start editing the text of a task. This returns `false` if there is no such local task
    pub fn begin_edit(&self, id: &TaskId) -> bool {
        let mut state = self.state();
        let text = match state.tasks.iter().find(|t| t.id() == id) {
            None => return false,
            Some(task) => task.text().to_string(),
        };
        state.editing = Some(Edit { id: id.clone(), text });
        true
    }

    /// Change the text being edited. This returns `false` if no edition is in progress
    pub fn set_edit_text<S: ToString>(&self, text: S) -> bool {
        match &mut self.state().editing {
            None => false,
            Some(edit) => {
                edit.text = text.to_string();
                true
            },
        }
    }

    pub fn editing(&self) -> Option<Edit> {
        self.state().editing.clone()
    }

    /// Discard the current edition. Nothing is sent
    pub fn cancel_edit(&self) {
        self.state().editing = None;
    }

    /// End the current edition, and update the task with the trimmed edited text.
    ///
    /// Nothing is sent (and `Ok(None)` is returned) when no edition is in progress, when the edited text is blank,
    /// or when the task has been removed in the meantime.
    pub async fn commit_edit(&self) -> Result<Option<Task>, Error> {
        let edit = match self.state().editing.take() {
            None => return Ok(None),
            Some(edit) => edit,
        };

        let text = edit.text.trim();
        if text.is_empty() {
            log::debug!("Edited text of task {} is empty, nothing to update", edit.id);
            return Ok(None);
        }
        let mut task = match self.task(&edit.id) {
            None => {
                log::warn!("Task {} has been removed while it was edited", edit.id);
                return Ok(None);
            },
            Some(task) => task,
        };

        task.set_text(text.to_string());
        self.update(task).await.map(Some)
    }
}
