pub mod chat;
pub mod guestbook_entry;
pub mod message;

pub use chat::{ChatMessage, ChatRequest, IncomingMessage};
pub use guestbook_entry::{GuestbookEntry, NewGuestbookEntry};
pub use message::{Message, NewMessage};
