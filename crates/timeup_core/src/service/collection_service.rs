//! Write-through service over one persisted collection.
//!
//! # Responsibility
//! - Load the collection once on open, seeding when storage is unusable.
//! - Apply commands to the in-memory state and write back every mutation.
//!
//! # Invariants
//! - After a successful write the store holds exactly `records()`.
//! - Write failures are logged and do not roll back the in-memory state.

use super::command::{apply, Collection, Command, Creatable, Outcome};
use crate::model::record_id::RecordId;
use crate::persistence::{check_collection, load_collection, save_collection};
use crate::store::KeyValueStore;
use crate::validation::FieldErrors;
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Generic collection service used by the task and schedule services.
pub struct CollectionService<R, S> {
    store: S,
    key: &'static str,
    collection: Collection<R>,
}

impl<R, S> CollectionService<R, S>
where
    R: Creatable + Clone + Serialize + DeserializeOwned,
    S: KeyValueStore,
{
    /// Opens the collection stored under `key`.
    pub fn open(store: S, key: &'static str, seed: impl FnOnce() -> Vec<R>) -> Self {
        let records = load_collection(&store, key, seed);
        let collection = match Collection::try_new(records) {
            Ok(collection) => collection,
            Err(reason) => {
                // Seed data failed its own checks; start empty rather than panic.
                warn!("event=collection_open module=service status=error key={key} error={reason}");
                Collection::default()
            }
        };
        Self {
            store,
            key,
            collection,
        }
    }

    pub fn records(&self) -> &[R] {
        self.collection.records()
    }

    pub fn collection(&self) -> &Collection<R> {
        &self.collection
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Applies `command` and writes the collection back when it changed.
    pub fn execute(&mut self, command: Command<R::Input>) -> Outcome<R> {
        let state = std::mem::take(&mut self.collection);
        let (next, outcome) = apply(state, command);
        self.collection = next;

        match &outcome {
            Outcome::Created(record) => {
                info!(
                    "event=record_create module=service status=ok key={} id={}",
                    self.key,
                    record.id()
                );
                self.persist();
            }
            Outcome::Deleted(record) => {
                info!(
                    "event=record_delete module=service status=ok key={} id={}",
                    self.key,
                    record.id()
                );
                self.persist();
            }
            Outcome::Unchanged => {
                info!(
                    "event=record_delete module=service status=noop key={} reason=not_found",
                    self.key
                );
            }
            Outcome::Rejected(errors) => {
                let fields = errors.iter().map(|(field, _)| field).collect::<Vec<_>>();
                info!(
                    "event=record_create module=service status=rejected key={} fields={}",
                    self.key,
                    fields.join(",")
                );
            }
        }
        outcome
    }

    /// Validates and inserts a new record.
    pub fn create(&mut self, input: R::Input) -> Result<R, FieldErrors> {
        match self.execute(Command::Create(input)) {
            Outcome::Created(record) => Ok(record),
            Outcome::Rejected(errors) => Err(errors),
            Outcome::Deleted(_) | Outcome::Unchanged => {
                unreachable!("create commands never delete")
            }
        }
    }

    /// Removes the record with `id`; `None` when it did not exist.
    pub fn delete(&mut self, id: &RecordId) -> Option<R> {
        match self.execute(Command::Delete(id.clone())) {
            Outcome::Deleted(record) => Some(record),
            _ => None,
        }
    }

    fn persist(&mut self) {
        debug_assert!(check_collection(self.collection.records()).is_ok());
        if let Err(err) = save_collection(&mut self.store, self.key, self.collection.records()) {
            warn!(
                "event=collection_save module=service status=error key={} error={}",
                self.key, err
            );
        }
    }
}
