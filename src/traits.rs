//! Traits used by the task store

use async_trait::async_trait;

use crate::error::Error;
use crate::task::{Task, TaskDraft, TaskId};

/// A remote collection of tasks (e.g. a REST endpoint).
///
/// The collection is always the source of truth: every mutating call returns what the collection has actually stored.
/// None of these calls is retried, and an update always overwrites the whole record (there is no version check).
#[async_trait]
pub trait TaskCollection {
    /// Returns every task of the collection, in the order the collection gives them
    async fn get_tasks(&self) -> Result<Vec<Task>, Error>;

    /// Create a task. The collection assigns its ID, and returns the created task
    async fn create_task(&self, draft: &TaskDraft) -> Result<Task, Error>;

    /// Replace the task that has the same ID, and return the stored version
    async fn update_task(&self, task: &Task) -> Result<Task, Error>;

    /// Remove a task. Whatever the collection replies is ignored, apart from its status
    async fn delete_task(&self, id: &TaskId) -> Result<(), Error>;
}
