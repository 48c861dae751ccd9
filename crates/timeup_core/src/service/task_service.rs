//! Task list use-cases.

use super::collection_service::CollectionService;
use crate::model::record_id::RecordId;
use crate::model::task::Task;
use crate::persistence::seed::seed_tasks;
use crate::persistence::TASKS_KEY;
use crate::store::KeyValueStore;
use crate::validation::{FieldErrors, TaskInput};
use crate::view;
use chrono::{DateTime, Utc};

/// Task collection backed by `TASKS_KEY`.
pub struct TaskService<S: KeyValueStore> {
    inner: CollectionService<Task, S>,
}

impl<S: KeyValueStore> TaskService<S> {
    /// Loads tasks, seeding with sample tasks due relative to now.
    pub fn open(store: S) -> Self {
        Self::open_at(store, Utc::now())
    }

    /// Loads tasks, seeding with sample tasks due relative to `now`.
    pub fn open_at(store: S, now: DateTime<Utc>) -> Self {
        Self {
            inner: CollectionService::open(store, TASKS_KEY, || seed_tasks(now)),
        }
    }

    /// Tasks in collection order (newest creations first).
    pub fn tasks(&self) -> &[Task] {
        self.inner.records()
    }

    /// Validates and prepends a new task, then writes the collection back.
    pub fn create_task(&mut self, input: TaskInput) -> Result<Task, FieldErrors> {
        self.inner.create(input)
    }

    /// Removes the task with `id`; returns it when it existed.
    pub fn delete_task(&mut self, id: &RecordId) -> Option<Task> {
        self.inner.delete(id)
    }

    pub fn upcoming(&self, now: DateTime<Utc>) -> Vec<&Task> {
        view::upcoming_tasks(self.tasks(), now)
    }

    pub fn by_due_date(&self) -> Vec<&Task> {
        view::tasks_by_due_date(self.tasks())
    }

    pub fn store(&self) -> &S {
        self.inner.store()
    }

    pub fn into_store(self) -> S {
        self.inner.into_store()
    }
}
