use serde::{Deserialize, Serialize};

/// A conversation turn as clients send it. Two field-naming conventions are
/// tolerated: `role`/`content` and `sender`/`text`.
#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    pub role: Option<String>,
    pub sender: Option<String>,
    pub content: Option<String>,
    pub text: Option<String>,
}

/// The canonical turn shape expected by the completion API
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Body of POST /api/chat
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Option<Vec<IncomingMessage>>,
}
