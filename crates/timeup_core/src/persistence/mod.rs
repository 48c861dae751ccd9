//! Collection persistence over a key-value store.
//!
//! # Responsibility
//! - Load a full collection from one key, degrading to seed data on any
//!   read, decode or structural failure.
//! - Save a full collection as a JSON array, overwriting the previous value.
//!
//! # Invariants
//! - `load_collection` never fails; every fallback is logged.
//! - Loaded collections have unique ids and pass `Record::check`.
//! - Dates are stored as ISO-8601 strings and decoded into `DateTime<Utc>`.

use crate::model::Record;
use crate::store::{KeyValueStore, StoreError};
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod seed;

/// Storage key of the task collection.
pub const TASKS_KEY: &str = "timeup.tasks";
/// Storage key of the class schedule collection.
pub const SCHEDULE_KEY: &str = "timeup.schedule";

/// Failure while writing a collection.
#[derive(Debug)]
pub enum PersistenceError {
    Encode(serde_json::Error),
    Store(StoreError),
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode collection: {err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

impl From<StoreError> for PersistenceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Why a stored collection was not usable.
#[derive(Debug)]
enum LoadFailure {
    Missing,
    Read(StoreError),
    Decode(serde_json::Error),
    Invalid(String),
}

impl Display for LoadFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => write!(f, "no stored value"),
            Self::Read(err) => write!(f, "{err}"),
            Self::Decode(err) => write!(f, "{err}"),
            Self::Invalid(reason) => write!(f, "{reason}"),
        }
    }
}

impl LoadFailure {
    fn code(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Read(_) => "read_failed",
            Self::Decode(_) => "decode_failed",
            Self::Invalid(_) => "invalid_content",
        }
    }
}

/// Loads the collection stored under `key`, or `seed()` when unusable.
pub fn load_collection<R, S, F>(store: &S, key: &str, seed: F) -> Vec<R>
where
    R: Record + DeserializeOwned,
    S: KeyValueStore + ?Sized,
    F: FnOnce() -> Vec<R>,
{
    match try_load(store, key) {
        Ok(records) => {
            info!(
                "event=collection_load module=persistence status=ok key={key} count={}",
                records.len()
            );
            records
        }
        Err(LoadFailure::Missing) => {
            info!("event=collection_load module=persistence status=seeded key={key} reason=missing");
            seed()
        }
        Err(failure) => {
            warn!(
                "event=collection_load module=persistence status=seeded key={key} error_code={} error={}",
                failure.code(),
                failure
            );
            seed()
        }
    }
}

/// Serializes `records` and overwrites the value stored under `key`.
///
/// # Errors
/// - `PersistenceError::Store` when the store rejects the write, e.g. when a
///   quota is exceeded.
pub fn save_collection<R, S>(store: &mut S, key: &str, records: &[R]) -> Result<(), PersistenceError>
where
    R: Record + Serialize,
    S: KeyValueStore + ?Sized,
{
    let bytes = serde_json::to_vec(records)?;
    store.set(key, &bytes)?;
    info!(
        "event=collection_save module=persistence status=ok key={key} count={} bytes={}",
        records.len(),
        bytes.len()
    );
    Ok(())
}

fn try_load<R, S>(store: &S, key: &str) -> Result<Vec<R>, LoadFailure>
where
    R: Record + DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let bytes = store
        .get(key)
        .map_err(LoadFailure::Read)?
        .ok_or(LoadFailure::Missing)?;
    let records: Vec<R> = serde_json::from_slice(&bytes).map_err(LoadFailure::Decode)?;
    check_collection(&records).map_err(LoadFailure::Invalid)?;
    Ok(records)
}

/// Verifies per-record invariants and id uniqueness.
pub fn check_collection<R: Record>(records: &[R]) -> Result<(), String> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        record.check()?;
        if !seen.insert(record.id()) {
            return Err(format!("duplicate record id `{}`", record.id()));
        }
    }
    Ok(())
}
