//! Core data layer for the TimeUp student planner.
//! This crate is the single source of truth for record invariants.

pub mod config;
pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod persistence;
pub mod service;
pub mod store;
pub mod validation;
pub mod view;

pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::class_item::{ClassItem, ClockTime, Weekday};
pub use model::locale::{Labelled, Locale};
pub use model::record_id::RecordId;
pub use model::task::{Task, TaskKind};
pub use model::Record;
pub use persistence::{load_collection, save_collection, PersistenceError, SCHEDULE_KEY, TASKS_KEY};
pub use service::command::{apply, Collection, Command, Outcome};
pub use service::schedule_service::ScheduleService;
pub use service::task_service::TaskService;
pub use store::{KeyValueStore, MemoryStore, SqliteKeyValueStore, StoreError, StoreResult};
pub use validation::{
    validate_class, validate_task, validate_task_in, ClassInput, FieldErrors, TaskInput,
};
pub use view::{Dashboard, DaySchedule};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
