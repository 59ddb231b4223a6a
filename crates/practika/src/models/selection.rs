use serde::{Deserialize, Serialize};

use practika_core::practice::{Entry, EntryRecord};

/// Request payload for recording time against an entry.
#[derive(Debug, Deserialize)]
pub struct AddTimePayload {
    /// Minutes to record. Zero is accepted and records nothing.
    pub time: u32,
}

/// Response body for the add-time operation.
///
/// The detail fields are present only when time was actually recorded;
/// the zero-minute no-op returns just the message.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTimeResponse {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_entry: Option<Entry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_time_spent: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_record: Option<EntryRecord>,
}
