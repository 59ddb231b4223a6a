use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use practika_core::practice::Routine;

/// Request payload for creating a new routine.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoutine {
    pub name: String,
    /// Ordered entry ids; duplicates are kept.
    #[serde(default)]
    pub entries: Vec<Uuid>,
}

impl CreateRoutine {
    /// Converts the create request into a Routine.
    pub fn into_routine(self) -> Routine {
        Routine::new(self.name).with_entries(self.entries)
    }
}

/// Request payload for updating a routine. Absent fields are left as-is;
/// a present `entries` replaces the list wholesale.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoutine {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub entries: Option<Vec<Uuid>>,
}

impl UpdateRoutine {
    /// Applies the update to an existing routine.
    pub fn apply_to(self, routine: &mut Routine) {
        routine.updated_at = Utc::now();

        if let Some(name) = self.name {
            routine.name = name;
        }
        if let Some(entries) = self.entries {
            routine.entries = entries;
        }
    }
}
