use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recording row stored in redb.
///
/// Rows are created once at upload completion and never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingRecord {
    /// Monotonically assigned by the store, never reused.
    pub id: u64,
    /// Server-generated blob name; also the key in the blob store.
    pub filename: String,
    /// Path of the blob under the static serving mount (`uploads/<filename>`).
    pub filepath: String,
    /// Byte length of the uploaded blob, captured at upload time.
    pub filesize: u64,
    pub created_at: DateTime<Utc>,
}
