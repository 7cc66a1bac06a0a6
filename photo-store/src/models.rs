use base64::Engine;
use serde::Serialize;

/// A photo as persisted in the store. Records are immutable once written:
/// they are created on ingest, deleted on request, never updated.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoRecord {
    /// Store-assigned auto-incrementing id
    pub id: i64,
    /// Raw binary payload
    pub data: Vec<u8>,
    /// MIME type of the payload
    pub mime_type: String,
    /// Ingest moment, RFC 3339
    pub captured_at: String,
}

/// The in-memory, displayable view of a [`PhotoRecord`]. Not persisted;
/// recreated whenever the store is opened or reloaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewablePhoto {
    /// Id of the record this view was materialized from
    pub id: i64,
    /// Display handle: a base64 data URL of the decoded payload
    pub data_url: String,
    /// Capture timestamp, RFC 3339
    pub captured_at: String,
}

impl ViewablePhoto {
    /// Materialize a display handle from a persisted record.
    pub fn from_record(record: &PhotoRecord) -> Self {
        let b64 = base64::engine::general_purpose::STANDARD.encode(&record.data);
        Self {
            id: record.id,
            data_url: format!("data:{};base64,{}", record.mime_type, b64),
            captured_at: record.captured_at.clone(),
        }
    }
}
