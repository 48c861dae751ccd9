//! Record types for the task list and the weekly schedule.
//!
//! # Responsibility
//! - Define the two persisted record shapes and their closed value sets.
//! - Keep canonical enum values separate from their display labels.
//!
//! # Invariants
//! - Every record is identified by a `RecordId` unique within its collection.
//! - `TaskKind`, `Weekday` and `ClockTime` can only hold valid values.

pub mod class_item;
pub mod locale;
pub mod record_id;
pub mod task;

/// Shared contract for records stored as a keyed collection.
pub trait Record {
    /// Stable identifier used for deletion and uniqueness checks.
    fn id(&self) -> &record_id::RecordId;

    /// Checks invariants that serde alone cannot express.
    ///
    /// Used on load so that structurally invalid persisted data is rejected
    /// as a whole instead of leaking into projections.
    fn check(&self) -> Result<(), String>;
}
