//! An in-memory task collection.
//!
//! It behaves like the reference REST backend (sequential integer IDs, `404` on unknown IDs), without any network.
//! This is mostly useful for tests and demos.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::StatusCode;

use crate::error::Error;
use crate::mock_behaviour::MockBehaviour;
use crate::task::{Task, TaskDraft, TaskId, TaskStatus};
use crate::traits::TaskCollection;

#[derive(Debug)]
struct MockData {
    tasks: Vec<Task>,
    next_id: i64,
}

/// A [`TaskCollection`] that stores its tasks in memory
#[derive(Debug)]
pub struct MockCollection {
    data: Mutex<MockData>,
    behaviour: Mutex<MockBehaviour>,
    request_count: AtomicUsize,
}

impl MockCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::with_tasks(Vec::new())
    }

    /// Create a collection that already contains some tasks.
    /// New tasks will get numeric IDs greater than any numeric ID among these.
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let next_id = tasks.iter()
            .filter_map(|task| task.id().as_number())
            .max()
            .unwrap_or(0) + 1;

        Self {
            data: Mutex::new(MockData { tasks, next_id }),
            behaviour: Mutex::new(MockBehaviour::new()),
            request_count: AtomicUsize::new(0),
        }
    }

    /// A collection with the two tasks the reference backend starts with
    pub fn with_sample_data(today: NaiveDate) -> Self {
        Self::with_tasks(vec![
            Task::new_with_parameters(TaskId::from(1), "Learn Go".to_string(), TaskStatus::Todo, Some(today), None),
            Task::new_with_parameters(TaskId::from(2), "Learn React".to_string(), TaskStatus::Done, Some(today), Some(today)),
        ])
    }

    pub fn set_behaviour(&self, behaviour: MockBehaviour) {
        *lock(&self.behaviour) = behaviour;
    }

    /// How many requests this collection has received so far (including the ones that were made to fail)
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// A snapshot of the stored tasks
    pub fn tasks(&self) -> Vec<Task> {
        lock(&self.data).tasks.clone()
    }

    /// Change a task "remotely", as another client would do
    pub fn mock_remote_update(&self, task: Task) -> bool {
        let mut data = lock(&self.data);
        match data.tasks.iter_mut().find(|t| t.id() == task.id()) {
            None => false,
            Some(stored) => {
                *stored = task;
                true
            },
        }
    }

    fn new_request(&self) {
        self.request_count.fetch_add(1, Ordering::SeqCst);
    }
}

impl Default for MockCollection {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn not_found(id: &TaskId) -> Error {
    Error::Status {
        status: StatusCode::NOT_FOUND,
        url: format!("mock:///tasks/{}", id),
    }
}

#[async_trait]
impl TaskCollection for MockCollection {
    async fn get_tasks(&self) -> Result<Vec<Task>, Error> {
        self.new_request();
        lock(&self.behaviour).can_get_tasks()?;
        Ok(self.tasks())
    }

    async fn create_task(&self, draft: &TaskDraft) -> Result<Task, Error> {
        self.new_request();
        lock(&self.behaviour).can_create_task()?;

        let mut data = lock(&self.data);
        let id = TaskId::from(data.next_id);
        data.next_id += 1;

        let task = Task::new_with_parameters(id, draft.text().to_string(), draft.status(),
                                             Some(draft.start_date()), draft.end_date());
        log::debug!("Mock collection: created task {}", task.id());
        data.tasks.push(task.clone());
        Ok(task)
    }

    async fn update_task(&self, task: &Task) -> Result<Task, Error> {
        self.new_request();
        lock(&self.behaviour).can_update_task()?;

        let mut data = lock(&self.data);
        match data.tasks.iter_mut().find(|t| t.id() == task.id()) {
            None => Err(not_found(task.id())),
            Some(stored) => {
                *stored = task.clone();
                Ok(stored.clone())
            },
        }
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), Error> {
        self.new_request();
        lock(&self.behaviour).can_delete_task()?;

        let mut data = lock(&self.data);
        let count_before = data.tasks.len();
        data.tasks.retain(|t| t.id() != id);
        if data.tasks.len() == count_before {
            return Err(not_found(id));
        }
        Ok(())
    }
}
