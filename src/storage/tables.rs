use redb::TableDefinition;

/// Recording rows: id -> RecordingRecord (msgpack)
pub const RECORDINGS: TableDefinition<u64, &[u8]> = TableDefinition::new("recordings");
