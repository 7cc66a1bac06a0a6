use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crate::models::{PhotoRecord, ViewablePhoto};
use crate::schema::init_photo_schema;

/// Error type for photo store operations
#[derive(Debug)]
pub enum StoreError {
    /// The host environment denied persistent storage (directory creation,
    /// database open or schema initialization failed)
    StorageUnavailable(String),
    /// A write transaction aborted; no partial record remains
    WriteFailed(rusqlite::Error),
    /// Read-side database failure
    Database(rusqlite::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::StorageUnavailable(msg) => write!(f, "Storage unavailable: {}", msg),
            StoreError::WriteFailed(e) => write!(f, "Write failed: {}", e),
            StoreError::Database(e) => write!(f, "Database error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Database(err)
    }
}

/// Handle to the local photo store.
///
/// Owns the database connection and the materialized viewable list. The
/// list is kept newest-first and 1:1 with the live records: `put` prepends,
/// `delete` removes the matching entry, `reload` rebuilds from scratch.
pub struct PhotoStore {
    conn: Connection,
    photos: Vec<ViewablePhoto>,
}

impl PhotoStore {
    /// Open (or create) the store at `path` and materialize the viewable list.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::StorageUnavailable(format!(
                    "cannot create store directory {:?}: {}",
                    parent, e
                ))
            })?;
        }

        let conn = Connection::open(path).map_err(|e| {
            StoreError::StorageUnavailable(format!("cannot open photo database: {}", e))
        })?;

        Self::from_connection(conn)
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            StoreError::StorageUnavailable(format!("cannot open in-memory database: {}", e))
        })?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        init_photo_schema(&conn).map_err(|e| {
            StoreError::StorageUnavailable(format!("cannot initialize photo schema: {}", e))
        })?;

        let mut store = Self {
            conn,
            photos: Vec::new(),
        };
        store.reload()?;
        Ok(store)
    }

    /// Append an immutable record. All-or-nothing: an aborted transaction
    /// leaves no partial record behind.
    ///
    /// Returns the store-assigned id. The viewable list gains one entry at
    /// the front (ingest always stamps "now" as `captured_at`).
    pub fn put(
        &mut self,
        data: Vec<u8>,
        mime_type: &str,
        captured_at: DateTime<Utc>,
    ) -> Result<i64, StoreError> {
        let captured_at = captured_at.to_rfc3339();

        let tx = self.conn.transaction().map_err(StoreError::WriteFailed)?;
        tx.execute(
            "INSERT INTO photos (data, mime_type, captured_at) VALUES (?1, ?2, ?3)",
            params![data, mime_type, captured_at],
        )
        .map_err(StoreError::WriteFailed)?;
        let id = tx.last_insert_rowid();
        tx.commit().map_err(StoreError::WriteFailed)?;

        log::debug!("stored photo id={} ({} bytes, {})", id, data.len(), mime_type);

        let record = PhotoRecord {
            id,
            data,
            mime_type: mime_type.to_string(),
            captured_at,
        };
        self.photos.insert(0, ViewablePhoto::from_record(&record));

        Ok(id)
    }

    /// The materialized viewable list, newest first.
    pub fn photos(&self) -> &[ViewablePhoto] {
        &self.photos
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    /// Rebuild the viewable list from every persisted record, decoding each
    /// payload into a display handle. Ordered by `captured_at` descending,
    /// id descending as tie-break. O(n) in photo count, no pagination; the
    /// store is single-user and galleries stay small.
    pub fn reload(&mut self) -> Result<(), StoreError> {
        let photos = {
            let mut stmt = self.conn.prepare(
                "SELECT id, data, mime_type, captured_at FROM photos
                 ORDER BY captured_at DESC, id DESC",
            )?;
            let records = stmt
                .query_map([], |row| {
                    Ok(PhotoRecord {
                        id: row.get(0)?,
                        data: row.get(1)?,
                        mime_type: row.get(2)?,
                        captured_at: row.get(3)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;

            records.iter().map(ViewablePhoto::from_record).collect()
        };

        self.photos = photos;
        Ok(())
    }

    /// Delete the photo at `index` in the materialized list: removes the
    /// record by its store-assigned id, drops the display handle and the
    /// in-memory entry. An out-of-range index is a no-op.
    pub fn delete(&mut self, index: usize) -> Result<(), StoreError> {
        let id = match self.photos.get(index) {
            Some(photo) => photo.id,
            None => {
                log::warn!("delete: positional index {} out of range, ignoring", index);
                return Ok(());
            }
        };

        self.conn
            .execute("DELETE FROM photos WHERE id = ?1", params![id])?;
        self.photos.remove(index);

        log::debug!("deleted photo id={} (index {})", id, index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_750_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_put_then_list_newest_first() {
        let mut store = PhotoStore::open_in_memory().unwrap();

        store.put(vec![1], "image/jpeg", ts(0)).unwrap();
        store.put(vec![2], "image/png", ts(10)).unwrap();
        let newest = store.put(vec![3], "image/jpeg", ts(20)).unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(store.photos()[0].id, newest);

        let stamps: Vec<&str> = store
            .photos()
            .iter()
            .map(|p| p.captured_at.as_str())
            .collect();
        let mut sorted = stamps.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(stamps, sorted);
    }

    #[test]
    fn test_reload_matches_in_memory_list() {
        let mut store = PhotoStore::open_in_memory().unwrap();
        store.put(vec![1, 1], "image/jpeg", ts(0)).unwrap();
        store.put(vec![2, 2], "image/jpeg", ts(5)).unwrap();

        let before: Vec<i64> = store.photos().iter().map(|p| p.id).collect();
        store.reload().unwrap();
        let after: Vec<i64> = store.photos().iter().map(|p| p.id).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_equal_timestamps_order_by_id_descending() {
        let mut store = PhotoStore::open_in_memory().unwrap();
        let first = store.put(vec![1], "image/jpeg", ts(0)).unwrap();
        let second = store.put(vec![2], "image/jpeg", ts(0)).unwrap();

        store.reload().unwrap();
        let ids: Vec<i64> = store.photos().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![second, first]);
    }

    #[test]
    fn test_delete_removes_exactly_one_and_shifts() {
        let mut store = PhotoStore::open_in_memory().unwrap();
        store.put(vec![1], "image/jpeg", ts(0)).unwrap();
        store.put(vec![2], "image/jpeg", ts(10)).unwrap();
        store.put(vec![3], "image/jpeg", ts(20)).unwrap();

        let before: Vec<i64> = store.photos().iter().map(|p| p.id).collect();
        store.delete(1).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.photos()[0].id, before[0]);
        assert_eq!(store.photos()[1].id, before[2]);

        // Persisted state agrees after a reload
        store.reload().unwrap();
        let ids: Vec<i64> = store.photos().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![before[0], before[2]]);
    }

    #[test]
    fn test_delete_out_of_range_is_noop() {
        let mut store = PhotoStore::open_in_memory().unwrap();
        store.put(vec![1], "image/jpeg", ts(0)).unwrap();

        store.delete(5).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_open_creates_and_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photos").join("photos.db");

        {
            let mut store = PhotoStore::open(&path).unwrap();
            store.put(vec![9, 9], "image/jpeg", ts(0)).unwrap();
        }

        let store = PhotoStore::open(&path).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_open_reports_storage_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        // A file where the parent directory should be denies the store.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let result = PhotoStore::open(&blocker.join("sub").join("photos.db"));
        assert!(matches!(result, Err(StoreError::StorageUnavailable(_))));
    }
}
