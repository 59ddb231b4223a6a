use chrono::Utc;
use serde::Deserialize;

use practika_core::practice::Entry;

/// Request payload for creating a new entry.
///
/// `time_spent` is deliberately absent: the running total is only ever
/// mutated through the time-recording operation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntry {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub scheduled_time: u32,
}

impl CreateEntry {
    /// Converts the create request into an Entry.
    pub fn into_entry(self) -> Entry {
        let mut entry = Entry::new(self.name, self.scheduled_time);
        entry.description = self.description;
        entry
    }
}

/// Request payload for updating an entry. Absent fields are left as-is.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub scheduled_time: Option<u32>,
}

impl UpdateEntry {
    /// Applies the update to an existing entry.
    pub fn apply_to(self, entry: &mut Entry) {
        entry.updated_at = Utc::now();

        if let Some(name) = self.name {
            entry.name = name;
        }
        if let Some(description) = self.description {
            entry.description = Some(description);
        }
        if let Some(scheduled_time) = self.scheduled_time {
            entry.scheduled_time = scheduled_time;
        }
    }
}
