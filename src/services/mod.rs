pub mod chat_service;
pub mod gallery_service;
pub mod guestbook_service;
pub mod message_service;
