//! In-memory collection state and the commands that change it.
//!
//! # Responsibility
//! - Hold one ordered collection with unique ids.
//! - Apply create/delete commands as `(state, command) -> (state', outcome)`.
//!
//! # Invariants
//! - `apply` never touches storage; persistence is the caller's concern.
//! - A rejected create leaves the collection untouched.
//! - Deleting an unknown id is `Outcome::Unchanged`, not an error.

use crate::model::class_item::ClassItem;
use crate::model::record_id::RecordId;
use crate::model::task::Task;
use crate::model::Record;
use crate::persistence::check_collection;
use crate::validation::{
    validate_class, validate_task, ClassDraft, ClassInput, FieldErrors, TaskDraft, TaskInput,
};

/// Where newly created records land in collection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    Front,
    Back,
}

/// Record type that can be created from validated form input.
pub trait Creatable: Record + Sized {
    type Input;
    type Draft;

    const INSERT_AT: InsertPosition;

    fn validate(input: &Self::Input) -> Result<Self::Draft, FieldErrors>;

    fn from_draft(draft: Self::Draft, id: RecordId) -> Self;
}

impl Creatable for Task {
    type Input = TaskInput;
    type Draft = TaskDraft;

    const INSERT_AT: InsertPosition = InsertPosition::Front;

    fn validate(input: &TaskInput) -> Result<TaskDraft, FieldErrors> {
        validate_task(input)
    }

    fn from_draft(draft: TaskDraft, id: RecordId) -> Self {
        draft.into_task(id)
    }
}

impl Creatable for ClassItem {
    type Input = ClassInput;
    type Draft = ClassDraft;

    const INSERT_AT: InsertPosition = InsertPosition::Back;

    fn validate(input: &ClassInput) -> Result<ClassDraft, FieldErrors> {
        validate_class(input)
    }

    fn from_draft(draft: ClassDraft, id: RecordId) -> Self {
        draft.into_class(id)
    }
}

/// Ordered records of one type with unique ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection<R> {
    records: Vec<R>,
}

impl<R> Default for Collection<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<R: Record> Collection<R> {
    /// Builds a collection, rejecting blank or duplicate ids.
    pub fn try_new(records: Vec<R>) -> Result<Self, String> {
        check_collection(&records)?;
        Ok(Self { records })
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn into_records(self) -> Vec<R> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &RecordId) -> Option<&R> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.get(id).is_some()
    }

    fn fresh_id(&self) -> RecordId {
        loop {
            let id = RecordId::generate();
            if !self.contains(&id) {
                return id;
            }
        }
    }

    fn insert(&mut self, record: R, position: InsertPosition) {
        match position {
            InsertPosition::Front => self.records.insert(0, record),
            InsertPosition::Back => self.records.push(record),
        }
    }

    fn remove(&mut self, id: &RecordId) -> Option<R> {
        let index = self.records.iter().position(|record| record.id() == id)?;
        Some(self.records.remove(index))
    }
}

/// Mutation request against one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<I> {
    Create(I),
    Delete(RecordId),
}

/// Result of applying a `Command`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<R> {
    Created(R),
    Deleted(R),
    /// Delete of an id that is not in the collection.
    Unchanged,
    Rejected(FieldErrors),
}

impl<R> Outcome<R> {
    /// Whether the collection changed and must be written back.
    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::Created(_) | Self::Deleted(_))
    }
}

/// Applies `command`, returning the next state and the outcome.
pub fn apply<R>(mut collection: Collection<R>, command: Command<R::Input>) -> (Collection<R>, Outcome<R>)
where
    R: Creatable + Clone,
{
    let outcome = match command {
        Command::Create(input) => match R::validate(&input) {
            Ok(draft) => {
                let record = R::from_draft(draft, collection.fresh_id());
                collection.insert(record.clone(), R::INSERT_AT);
                Outcome::Created(record)
            }
            Err(errors) => Outcome::Rejected(errors),
        },
        Command::Delete(id) => match collection.remove(&id) {
            Some(record) => Outcome::Deleted(record),
            None => Outcome::Unchanged,
        },
    };
    (collection, outcome)
}

#[cfg(test)]
mod tests {
    use super::{apply, Collection, Command, Outcome};
    use crate::model::class_item::ClassItem;
    use crate::model::task::Task;
    use crate::persistence::seed::{seed_schedule, seed_tasks};
    use crate::validation::{ClassInput, TaskInput};
    use chrono::Utc;

    #[test]
    fn try_new_rejects_duplicate_ids() {
        let mut tasks = seed_tasks(Utc::now());
        tasks.push(tasks[0].clone());
        assert!(Collection::try_new(tasks).is_err());
    }

    #[test]
    fn created_task_is_prepended() {
        let collection = Collection::try_new(seed_tasks(Utc::now())).unwrap();
        let input = TaskInput {
            title: "Read chapter 3".to_string(),
            due_date: Some("2026-11-02".to_string()),
            ..TaskInput::default()
        };

        let (next, outcome) = apply::<Task>(collection, Command::Create(input));
        let task = match outcome {
            Outcome::Created(task) => task,
            other => panic!("expected created outcome, got {other:?}"),
        };
        assert_eq!(next.len(), 5);
        assert_eq!(next.records()[0], task);
    }

    #[test]
    fn created_class_is_appended() {
        let collection = Collection::try_new(seed_schedule()).unwrap();
        let input = ClassInput {
            subject: "Statistics".to_string(),
            day: "Thursday".to_string(),
            start_time: "8:00".to_string(),
            end_time: "9:30".to_string(),
            location: None,
        };

        let (next, outcome) = apply::<ClassItem>(collection, Command::Create(input));
        assert!(outcome.is_mutation());
        assert_eq!(next.len(), 7);
        assert_eq!(next.records()[6].subject, "Statistics");
        assert_eq!(next.records()[6].start_time.as_str(), "08:00");
    }

    #[test]
    fn rejected_create_leaves_state_untouched() {
        let collection = Collection::try_new(seed_tasks(Utc::now())).unwrap();
        let before = collection.clone();

        let (next, outcome) = apply::<Task>(collection, Command::Create(TaskInput::default()));
        assert!(matches!(outcome, Outcome::Rejected(_)));
        assert!(!outcome.is_mutation());
        assert_eq!(next, before);
    }

    #[test]
    fn deleting_unknown_id_is_unchanged() {
        let collection = Collection::try_new(seed_schedule()).unwrap();
        let before = collection.clone();

        let (next, outcome) = apply::<ClassItem>(collection, Command::Delete("nope".into()));
        assert_eq!(outcome, Outcome::Unchanged);
        assert_eq!(next, before);
    }
}
