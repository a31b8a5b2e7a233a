use chrono::Utc;
use redb::ReadableTable;

use super::db::{Database, DatabaseError};
use super::models::RecordingRecord;
use super::tables::*;

impl Database {
    // ========================================================================
    // Recording operations
    // ========================================================================

    /// Insert a recording row with the next id and the current time.
    ///
    /// Ids start at 1 and grow by one per insert. redb serializes write
    /// transactions, so concurrent uploads still receive distinct ids.
    pub fn insert_recording(
        &self,
        filename: &str,
        filepath: &str,
        filesize: u64,
    ) -> Result<RecordingRecord, DatabaseError> {
        debug_assert!(!filename.is_empty(), "filename must not be empty");

        let write_txn = self.begin_write()?;
        let record = {
            let mut table = write_txn.open_table(RECORDINGS)?;
            let next_id = table.last()?.map(|(k, _)| k.value() + 1).unwrap_or(1);

            let record = RecordingRecord {
                id: next_id,
                filename: filename.to_string(),
                filepath: filepath.to_string(),
                filesize,
                created_at: Utc::now(),
            };

            let data = rmp_serde::to_vec_named(&record)?;
            table.insert(next_id, data.as_slice())?;
            record
        };
        write_txn.commit()?;
        Ok(record)
    }

    /// Get a recording by its id
    pub fn get_recording(&self, id: u64) -> Result<Option<RecordingRecord>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(RECORDINGS)?;

        match table.get(id)? {
            Some(data) => {
                let record: RecordingRecord = rmp_serde::from_slice(data.value())?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    /// List every recording, newest first.
    ///
    /// Sorted by creation time descending; ids break ties so two uploads
    /// landing in the same instant still order deterministically.
    pub fn list_recordings(&self) -> Result<Vec<RecordingRecord>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(RECORDINGS)?;

        let mut records = Vec::new();
        for result in table.iter()? {
            let (_, value) = result?;
            let record: RecordingRecord = rmp_serde::from_slice(value.value())?;
            records.push(record);
        }

        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(records)
    }
}
