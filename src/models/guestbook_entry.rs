use chrono::Utc;
use serde::{Deserialize, Serialize};

/// One guestbook entry. The whole entry list is the persisted unit; see
/// the guestbook service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GuestbookEntry {
    /// Creation timestamp in milliseconds, doubling as the id
    pub id: i64,
    pub author: String,
    pub text: String,
    pub created_at: String,
}

impl GuestbookEntry {
    pub fn new(author: String, text: String) -> Self {
        let now = Utc::now();
        Self {
            id: now.timestamp_millis(),
            author,
            text,
            created_at: now.to_rfc3339(),
        }
    }
}

/// Body of POST /api/guestbook
#[derive(Debug, Deserialize)]
pub struct NewGuestbookEntry {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub text: String,
}
