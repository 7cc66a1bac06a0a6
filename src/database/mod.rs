pub mod schema;

use std::path::Path;

use rusqlite::Connection;

use crate::error::AppError;

/// Open (or create) the site database and initialize its schema.
///
/// The connection is opened once at process start and held for the process
/// lifetime; every request maps to an independent operation on it.
pub fn init_database(path: &Path) -> Result<Connection, AppError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| AppError::Storage(format!("cannot create data directory: {}", e)))?;
    }

    let conn = Connection::open(path)
        .map_err(|e| AppError::Storage(format!("cannot open site database: {}", e)))?;

    schema::init_schema(&conn)?;

    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_database_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("lovenest.db");

        let conn = init_database(&path).unwrap();
        let tables: i32 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!(tables >= 2);
    }
}
