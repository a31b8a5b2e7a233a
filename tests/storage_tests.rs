use recording_manager::storage::Database;

fn test_db() -> (tempfile::TempDir, Database) {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open(dir.path().join("data")).unwrap();
    (dir, db)
}

#[test]
fn test_insert_and_get_recording() {
    let (_dir, db) = test_db();

    let record = db
        .insert_recording("recording-1700000000000.webm", "uploads/recording-1700000000000.webm", 1024)
        .unwrap();
    assert_eq!(record.id, 1);

    let retrieved = db.get_recording(1).unwrap().expect("row should exist");
    assert_eq!(retrieved.id, 1);
    assert_eq!(retrieved.filename, "recording-1700000000000.webm");
    assert_eq!(retrieved.filepath, "uploads/recording-1700000000000.webm");
    assert_eq!(retrieved.filesize, 1024);
    assert_eq!(retrieved.created_at, record.created_at);
}

#[test]
fn test_insert_assigns_monotonic_ids() {
    let (_dir, db) = test_db();

    let a = db.insert_recording("a.webm", "uploads/a.webm", 1).unwrap();
    let b = db.insert_recording("b.webm", "uploads/b.webm", 2).unwrap();
    let c = db.insert_recording("c.webm", "uploads/c.webm", 3).unwrap();

    assert_eq!(a.id, 1);
    assert_eq!(b.id, 2);
    assert_eq!(c.id, 3);
}

#[test]
fn test_get_recording_not_found() {
    let (_dir, db) = test_db();
    assert!(db.get_recording(42).unwrap().is_none());
}

#[test]
fn test_list_recordings_empty() {
    let (_dir, db) = test_db();
    assert!(db.list_recordings().unwrap().is_empty());
}

#[test]
fn test_list_recordings_newest_first() {
    let (_dir, db) = test_db();

    db.insert_recording("a.webm", "uploads/a.webm", 1).unwrap();
    db.insert_recording("b.webm", "uploads/b.webm", 2).unwrap();
    db.insert_recording("c.webm", "uploads/c.webm", 3).unwrap();

    let records = db.list_recordings().unwrap();
    assert_eq!(records.len(), 3);

    // Later inserts sort first; id breaks ties within the same instant
    let ids: Vec<u64> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);

    for pair in records.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }
}

#[test]
fn test_rows_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("data");

    {
        let db = Database::open(&data_dir).unwrap();
        db.insert_recording("keep.webm", "uploads/keep.webm", 512)
            .unwrap();
    }

    let db = Database::open(&data_dir).unwrap();
    let record = db.get_recording(1).unwrap().expect("row should persist");
    assert_eq!(record.filename, "keep.webm");

    // Id assignment continues where it left off
    let next = db.insert_recording("next.webm", "uploads/next.webm", 1).unwrap();
    assert_eq!(next.id, 2);
}
