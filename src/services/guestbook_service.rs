use rusqlite::{params, Connection, OptionalExtension};

use crate::error::AppError;
use crate::models::GuestbookEntry;

/// The single local-storage slot holding the serialized entry list
const GUESTBOOK_SLOT: &str = "guestbookMessages";

fn load_slot(conn: &Connection) -> Result<Vec<GuestbookEntry>, AppError> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT value FROM local_storage WHERE slot = ?1",
            params![GUESTBOOK_SLOT],
            |row| row.get(0),
        )
        .optional()?;

    match raw {
        Some(raw) => serde_json::from_str(&raw)
            .map_err(|e| AppError::Storage(format!("corrupt guestbook slot: {}", e))),
        None => Ok(Vec::new()),
    }
}

// The whole list is the persisted unit: one upsert, no partial writes.
fn save_slot(conn: &Connection, entries: &[GuestbookEntry]) -> Result<(), AppError> {
    let raw = serde_json::to_string(entries)
        .map_err(|e| AppError::Storage(format!("cannot serialize guestbook: {}", e)))?;

    conn.execute(
        "INSERT INTO local_storage (slot, value) VALUES (?1, ?2)
         ON CONFLICT(slot) DO UPDATE SET value = excluded.value",
        params![GUESTBOOK_SLOT, raw],
    )?;

    Ok(())
}

/// All entries, newest first
pub fn list_entries(conn: &Connection) -> Result<Vec<GuestbookEntry>, AppError> {
    load_slot(conn)
}

/// Prepend one entry. Author and text must both be non-empty.
pub fn create_entry(
    conn: &Connection,
    author: String,
    text: String,
) -> Result<GuestbookEntry, AppError> {
    if author.trim().is_empty() || text.trim().is_empty() {
        return Err(AppError::Validation(
            "author and text must not be empty".to_string(),
        ));
    }

    let entry = GuestbookEntry::new(author, text);

    let mut entries = load_slot(conn)?;
    entries.insert(0, entry.clone());
    save_slot(conn, &entries)?;

    log::info!("guestbook entry {} saved", entry.id);
    Ok(entry)
}

/// Remove the entry with `id`; unknown ids leave the list unchanged.
pub fn delete_entry(conn: &Connection, id: i64) -> Result<(), AppError> {
    let entries = load_slot(conn)?;
    let remaining: Vec<GuestbookEntry> = entries.into_iter().filter(|e| e.id != id).collect();
    save_slot(conn, &remaining)
}
