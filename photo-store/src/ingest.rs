use chrono::Utc;
use serde::Serialize;

use crate::convert::{is_legacy_container, transcode_to_jpeg};
use crate::store::PhotoStore;

/// One user-selected file handed to the ingest pipeline.
#[derive(Debug, Clone)]
pub struct IngestFile {
    pub name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// A file that failed conversion or storage.
#[derive(Debug, Clone, Serialize)]
pub struct IngestFailure {
    pub name: String,
    pub reason: String,
}

/// Aggregated outcome of one batch. The batch is not atomic: successes are
/// already visible in the store when the report is returned.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub stored: Vec<i64>,
    pub failures: Vec<IngestFailure>,
}

impl IngestReport {
    pub fn summary(&self) -> String {
        format!(
            "{} stored, {} failed",
            self.stored.len(),
            self.failures.len()
        )
    }
}

/// Ingest a batch of files, strictly one at a time. Sequential processing
/// bounds peak memory and keeps the progress count monotonic.
///
/// `on_progress(files_completed, total_files)` is invoked after each file,
/// whether it succeeded or failed.
pub fn ingest_batch<F>(
    store: &mut PhotoStore,
    files: Vec<IngestFile>,
    mut on_progress: F,
) -> IngestReport
where
    F: FnMut(usize, usize),
{
    let total = files.len();
    let mut report = IngestReport::default();

    for (done, file) in files.into_iter().enumerate() {
        let name = file.name.clone();
        match ingest_one(store, file) {
            Ok(id) => report.stored.push(id),
            Err(failure) => {
                log::warn!("ingest of {} failed: {}", name, failure.reason);
                report.failures.push(failure);
            }
        }
        on_progress(done + 1, total);
    }

    log::info!("ingest batch done: {}", report.summary());
    report
}

fn ingest_one(store: &mut PhotoStore, file: IngestFile) -> Result<i64, IngestFailure> {
    let IngestFile {
        name,
        mime_type,
        data,
    } = file;

    let (payload, stored_mime) = if is_legacy_container(&name, &mime_type) {
        log::debug!("converting legacy container {} to JPEG", name);
        match transcode_to_jpeg(&data) {
            Ok(jpeg) => (jpeg, "image/jpeg".to_string()),
            Err(e) => {
                return Err(IngestFailure {
                    name,
                    reason: e.to_string(),
                })
            }
        }
    } else {
        (data, mime_type)
    };

    store
        .put(payload, &stored_mime, Utc::now())
        .map_err(|e| IngestFailure {
            name,
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_file(name: &str, mime: &str, byte: u8) -> IngestFile {
        IngestFile {
            name: name.to_string(),
            mime_type: mime.to_string(),
            data: vec![byte; 16],
        }
    }

    #[test]
    fn test_batch_partial_failure_keeps_going() {
        let mut store = PhotoStore::open_in_memory().unwrap();

        let files = vec![
            plain_file("a.jpg", "image/jpeg", 1),
            // Garbage bytes under a legacy extension: conversion must fail
            plain_file("b.heic", "image/heic", 2),
            plain_file("c.png", "image/png", 3),
        ];

        let report = ingest_batch(&mut store, files, |_, _| {});

        assert_eq!(report.stored.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].name, "b.heic");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_progress_counts_every_file() {
        let mut store = PhotoStore::open_in_memory().unwrap();
        let files = vec![
            plain_file("a.jpg", "image/jpeg", 1),
            plain_file("b.heic", "image/heic", 2),
            plain_file("c.gif", "image/gif", 3),
        ];

        let mut seen = Vec::new();
        ingest_batch(&mut store, files, |done, total| seen.push((done, total)));

        assert_eq!(seen, vec![(1, 3), (2, 3), (3, 3)]);
    }

    #[test]
    fn test_passthrough_keeps_payload_and_type() {
        let mut store = PhotoStore::open_in_memory().unwrap();
        let files = vec![plain_file("pic.webp", "image/webp", 7)];

        let report = ingest_batch(&mut store, files, |_, _| {});
        assert_eq!(report.stored.len(), 1);
        assert!(store.photos()[0]
            .data_url
            .starts_with("data:image/webp;base64,"));
    }

    #[test]
    fn test_newest_ingested_listed_first() {
        let mut store = PhotoStore::open_in_memory().unwrap();
        let files = vec![
            plain_file("first.jpg", "image/jpeg", 1),
            plain_file("second.jpg", "image/jpeg", 2),
        ];

        let report = ingest_batch(&mut store, files, |_, _| {});
        assert_eq!(store.photos()[0].id, *report.stored.last().unwrap());
    }

    #[test]
    fn test_empty_batch_reports_nothing() {
        let mut store = PhotoStore::open_in_memory().unwrap();
        let mut called = false;
        let report = ingest_batch(&mut store, Vec::new(), |_, _| called = true);

        assert!(report.stored.is_empty());
        assert!(report.failures.is_empty());
        assert!(!called);
    }
}
