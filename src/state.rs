use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::config::Config;
use crate::database;
use crate::error::AppError;
use crate::services::chat_service::ChatRelay;
use crate::services::gallery_service::Gallery;

/// Running ingest progress, readable while an upload is in flight
#[derive(Default)]
pub struct UploadProgress {
    completed: AtomicUsize,
    total: AtomicUsize,
}

impl UploadProgress {
    pub fn set(&self, completed: usize, total: usize) {
        self.total.store(total, Ordering::Relaxed);
        self.completed.store(completed, Ordering::Relaxed);
    }

    pub fn get(&self) -> (usize, usize) {
        (
            self.completed.load(Ordering::Relaxed),
            self.total.load(Ordering::Relaxed),
        )
    }

    pub fn reset(&self) {
        self.set(0, 0);
    }
}

/// Shared per-process state handed to every request handler
pub struct AppState {
    pub config: Config,
    /// Document-store connection, opened once at process start and held for
    /// the process lifetime
    db: Mutex<Connection>,
    gallery: Mutex<Gallery>,
    pub chat: ChatRelay,
    pub progress: UploadProgress,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Initialize everything the process owns: the site database, the photo
    /// store, and the chat relay client.
    pub fn new(config: Config) -> Result<SharedState, AppError> {
        let conn = database::init_database(&config.site_db_path())?;

        let mut gallery = Gallery::new();
        gallery.open(&config.photo_db_path())?;

        let chat = ChatRelay::new(config.chat.clone())?;

        Ok(Arc::new(Self {
            db: Mutex::new(conn),
            gallery: Mutex::new(gallery),
            chat,
            progress: UploadProgress::default(),
            config,
        }))
    }

    pub fn db(&self) -> Result<MutexGuard<'_, Connection>, AppError> {
        self.db
            .lock()
            .map_err(|_| AppError::Storage("site database lock poisoned".to_string()))
    }

    pub fn gallery(&self) -> Result<MutexGuard<'_, Gallery>, AppError> {
        self.gallery
            .lock()
            .map_err(|_| AppError::Storage("gallery lock poisoned".to_string()))
    }
}
