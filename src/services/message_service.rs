use rusqlite::{params, Connection};

use crate::error::AppError;
use crate::models::{Message, NewMessage};

/// All messages, newest first
pub fn list_messages(conn: &Connection) -> Result<Vec<Message>, AppError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, content, timestamp FROM messages
         ORDER BY timestamp DESC, rowid DESC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(Message {
            id: row.get(0)?,
            name: row.get(1)?,
            content: row.get(2)?,
            timestamp: row.get(3)?,
        })
    })?;

    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Insert one message and return the created record
pub fn create_message(conn: &Connection, new: NewMessage) -> Result<Message, AppError> {
    let message = Message::new(new.name, new.content);

    conn.execute(
        "INSERT INTO messages (id, name, content, timestamp) VALUES (?1, ?2, ?3, ?4)",
        params![message.id, message.name, message.content, message.timestamp],
    )?;

    log::info!("message saved: {}", message.id);
    Ok(message)
}
