use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One record of the message board's document collection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub id: String,
    pub name: String,
    pub content: String,
    pub timestamp: String,
}

impl Message {
    /// Build a record with a store-assigned id and the timestamp defaulted
    /// to now.
    pub fn new(name: String, content: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            content,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Body of POST /api/messages. Missing fields default instead of failing.
#[derive(Debug, Deserialize)]
pub struct NewMessage {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub content: String,
}
