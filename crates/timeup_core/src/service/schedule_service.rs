//! Weekly schedule use-cases.

use super::collection_service::CollectionService;
use crate::model::class_item::{ClassItem, Weekday};
use crate::model::record_id::RecordId;
use crate::persistence::seed::seed_schedule;
use crate::persistence::SCHEDULE_KEY;
use crate::store::KeyValueStore;
use crate::validation::{ClassInput, FieldErrors};
use crate::view::{self, DaySchedule};

/// Class collection backed by `SCHEDULE_KEY`.
pub struct ScheduleService<S: KeyValueStore> {
    inner: CollectionService<ClassItem, S>,
}

impl<S: KeyValueStore> ScheduleService<S> {
    pub fn open(store: S) -> Self {
        Self {
            inner: CollectionService::open(store, SCHEDULE_KEY, seed_schedule),
        }
    }

    /// Classes in collection order (oldest creations first).
    pub fn classes(&self) -> &[ClassItem] {
        self.inner.records()
    }

    /// Validates and appends a new class, then writes the collection back.
    pub fn create_class(&mut self, input: ClassInput) -> Result<ClassItem, FieldErrors> {
        self.inner.create(input)
    }

    /// Removes the class with `id`; returns it when it existed.
    pub fn delete_class(&mut self, id: &RecordId) -> Option<ClassItem> {
        self.inner.delete(id)
    }

    pub fn on(&self, day: Weekday) -> Vec<&ClassItem> {
        view::classes_on(self.classes(), day)
    }

    pub fn by_day(&self) -> Vec<DaySchedule<'_>> {
        view::classes_by_day(self.classes())
    }

    pub fn store(&self) -> &S {
        self.inner.store()
    }

    pub fn into_store(self) -> S {
        self.inner.into_store()
    }
}
