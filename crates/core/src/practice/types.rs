use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::operations::{total_scheduled_time, total_time_spent};

/// A named practice task with a target duration.
///
/// `time_spent` is a denormalized running total of recorded minutes; the
/// authoritative time series lives in [`EntryRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Target duration in minutes.
    pub scheduled_time: u32,
    /// Minutes recorded against this entry so far.
    pub time_spent: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entry {
    /// Creates a new entry with the given name and scheduled duration.
    pub fn new(name: impl Into<String>, scheduled_time: u32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            scheduled_time,
            time_spent: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the description for this entry.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a specific ID for this entry (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Sets the creation timestamp (useful for testing).
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

/// An ordered collection of entry references.
///
/// The entry list preserves insertion order and permits duplicates; it is
/// never deduplicated. Referential integrity is not enforced — a routine may
/// hold ids of deleted entries, which are skipped on population.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Routine {
    pub id: Uuid,
    pub name: String,
    /// Ordered entry ids.
    pub entries: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Routine {
    /// Creates a new routine with the given name and no entries.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            entries: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the entry list for this routine.
    pub fn with_entries(mut self, entries: Vec<Uuid>) -> Self {
        self.entries = entries;
        self
    }

    /// Sets a specific ID for this routine (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

/// The single currently active routine.
///
/// At most one of these exists after any successful write; the store
/// enforces the singleton with an atomic slot replace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedRoutine {
    /// Id of the selected routine.
    pub routine: Uuid,
    pub selected_at: DateTime<Utc>,
}

impl SelectedRoutine {
    /// Creates a selection pointing at the given routine, stamped now.
    pub fn new(routine: Uuid) -> Self {
        Self {
            routine,
            selected_at: Utc::now(),
        }
    }
}

/// An immutable audit record of minutes spent on an entry.
///
/// Append-only: created exactly once per successful time-recording call with
/// a positive duration, never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRecord {
    pub id: Uuid,
    /// Id of the entry this record belongs to.
    pub entry: Uuid,
    pub date: DateTime<Utc>,
    /// Minutes recorded by this call.
    pub total_time: u32,
}

impl EntryRecord {
    /// Creates a record of `total_time` minutes against `entry`, dated now.
    pub fn new(entry: Uuid, total_time: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            entry,
            date: Utc::now(),
            total_time,
        }
    }
}

/// A routine with its entry references resolved and aggregates computed.
///
/// Aggregates are derived on construction from the entries passed in; they
/// are never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineView {
    pub id: Uuid,
    pub name: String,
    pub entries: Vec<Entry>,
    pub total_scheduled_time: u32,
    pub total_time_spent: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RoutineView {
    /// Builds a populated view from a routine and its resolved entries.
    ///
    /// `entries` must already be in routine order with dangling references
    /// skipped (repositories resolve ids that way).
    pub fn from_parts(routine: Routine, entries: Vec<Entry>) -> Self {
        let total_scheduled_time = total_scheduled_time(&entries);
        let total_time_spent = total_time_spent(&entries);
        Self {
            id: routine.id,
            name: routine.name,
            entries,
            total_scheduled_time,
            total_time_spent,
            created_at: routine.created_at,
            updated_at: routine.updated_at,
        }
    }
}

/// The populated selection returned by the selected-routine read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedRoutineView {
    pub routine: RoutineView,
    pub selected_at: DateTime<Utc>,
    pub total_scheduled_time: u32,
    pub total_time_spent: u32,
}

impl SelectedRoutineView {
    /// Builds the view from a selection and the populated routine.
    pub fn from_parts(selection: SelectedRoutine, routine: RoutineView) -> Self {
        let total_scheduled_time = routine.total_scheduled_time;
        let total_time_spent = routine.total_time_spent;
        Self {
            routine,
            selected_at: selection.selected_at,
            total_scheduled_time,
            total_time_spent,
        }
    }
}

/// An entry record joined with its entry for reporting.
///
/// `entry` is `None` when the referenced entry has been deleted; dangling
/// records are tolerated, not hidden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRecordView {
    pub id: Uuid,
    pub entry: Option<Entry>,
    pub date: DateTime<Utc>,
    pub total_time: u32,
}

impl EntryRecordView {
    /// Joins a record with its entry, if it still exists.
    pub fn from_parts(record: EntryRecord, entry: Option<Entry>) -> Self {
        Self {
            id: record.id,
            entry,
            date: record.date,
            total_time: record.total_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_defaults() {
        let entry = Entry::new("Scales", 15);
        assert_eq!(entry.name, "Scales");
        assert_eq!(entry.scheduled_time, 15);
        assert_eq!(entry.time_spent, 0);
        assert!(entry.description.is_none());
    }

    #[test]
    fn test_entry_serializes_camel_case() {
        let entry = Entry::new("Scales", 15);
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("scheduledTime").is_some());
        assert!(json.get("timeSpent").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("scheduled_time").is_none());
    }

    #[test]
    fn test_routine_preserves_entry_order_and_duplicates() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let routine = Routine::new("Warm-up").with_entries(vec![b, a, b]);
        assert_eq!(routine.entries, vec![b, a, b]);
    }

    #[test]
    fn test_routine_view_aggregates() {
        let entries = vec![Entry::new("Scales", 15), Entry::new("Arpeggios", 20)];
        let routine = Routine::new("Warm-up").with_entries(entries.iter().map(|e| e.id).collect());

        let view = RoutineView::from_parts(routine, entries);

        assert_eq!(view.total_scheduled_time, 35);
        assert_eq!(view.total_time_spent, 0);
    }

    #[test]
    fn test_selected_view_mirrors_routine_aggregates() {
        let entries = vec![Entry::new("Scales", 15)];
        let routine = Routine::new("Warm-up").with_entries(entries.iter().map(|e| e.id).collect());
        let selection = SelectedRoutine::new(routine.id);

        let view =
            SelectedRoutineView::from_parts(selection, RoutineView::from_parts(routine, entries));

        assert_eq!(view.total_scheduled_time, 15);
        assert_eq!(view.total_time_spent, 0);
    }

    #[test]
    fn test_record_view_tolerates_dangling_entry() {
        let record = EntryRecord::new(Uuid::new_v4(), 10);
        let view = EntryRecordView::from_parts(record.clone(), None);
        assert_eq!(view.id, record.id);
        assert!(view.entry.is_none());
        assert_eq!(view.total_time, 10);
    }
}
