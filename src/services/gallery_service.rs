use std::path::Path;

use photo_store::{ingest_batch, IngestFile, IngestReport, PhotoStore, ViewablePhoto};

use crate::error::AppError;

/// View-model over the local photo store: the ordered photo list, batch
/// ingest with a visible progress count, and deletion by list position.
pub struct Gallery {
    store: Option<PhotoStore>,
}

impl Gallery {
    /// A gallery whose store has not been opened yet
    pub fn new() -> Self {
        Self { store: None }
    }

    pub fn open(&mut self, path: &Path) -> Result<(), AppError> {
        let store = PhotoStore::open(path)?;
        log::info!("photo store opened with {} photos", store.len());
        self.store = Some(store);
        Ok(())
    }

    /// The ordered viewable list; empty until the store is open
    pub fn photos(&self) -> &[ViewablePhoto] {
        self.store.as_ref().map(PhotoStore::photos).unwrap_or(&[])
    }

    /// Run the ingest pipeline over a batch of user-selected files.
    /// `on_progress` receives `(files_completed, total_files)` after each
    /// file.
    pub fn ingest<F>(
        &mut self,
        files: Vec<IngestFile>,
        on_progress: F,
    ) -> Result<IngestReport, AppError>
    where
        F: FnMut(usize, usize),
    {
        let store = self
            .store
            .as_mut()
            .ok_or_else(|| AppError::Storage("photo store is not open".to_string()))?;

        Ok(ingest_batch(store, files, on_progress))
    }

    /// Delete the photo at `index` in the current list. Silently ignored
    /// when the store has not finished opening; callers are expected to
    /// `open()` first.
    pub fn delete(&mut self, index: usize) -> Result<(), AppError> {
        match self.store.as_mut() {
            Some(store) => Ok(store.delete(index)?),
            None => {
                log::warn!("photo delete requested before the store opened, ignoring");
                Ok(())
            }
        }
    }
}

impl Default for Gallery {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_gallery(dir: &tempfile::TempDir) -> Gallery {
        let mut gallery = Gallery::new();
        gallery.open(&dir.path().join("photos.db")).unwrap();
        gallery
    }

    fn file(name: &str, mime: &str) -> IngestFile {
        IngestFile {
            name: name.to_string(),
            mime_type: mime.to_string(),
            data: vec![0xAB; 8],
        }
    }

    #[test]
    fn test_ingest_reports_and_lists() {
        let dir = tempfile::tempdir().unwrap();
        let mut gallery = open_gallery(&dir);

        let report = gallery
            .ingest(
                vec![file("a.jpg", "image/jpeg"), file("b.heic", "image/heic")],
                |_, _| {},
            )
            .unwrap();

        assert_eq!(report.stored.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(gallery.photos().len(), 1);
    }

    #[test]
    fn test_delete_before_open_is_silent_noop() {
        let mut gallery = Gallery::new();

        gallery.delete(0).unwrap();
        assert!(gallery.photos().is_empty());
    }

    #[test]
    fn test_ingest_before_open_is_an_error() {
        let mut gallery = Gallery::new();
        let result = gallery.ingest(vec![file("a.jpg", "image/jpeg")], |_, _| {});
        assert!(matches!(result, Err(AppError::Storage(_))));
    }

    #[test]
    fn test_delete_keeps_list_in_sync() {
        let dir = tempfile::tempdir().unwrap();
        let mut gallery = open_gallery(&dir);

        gallery
            .ingest(
                vec![file("a.jpg", "image/jpeg"), file("b.png", "image/png")],
                |_, _| {},
            )
            .unwrap();
        assert_eq!(gallery.photos().len(), 2);

        gallery.delete(0).unwrap();
        assert_eq!(gallery.photos().len(), 1);
    }
}
