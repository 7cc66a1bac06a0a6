//! # Photo Store
//!
//! Local, per-profile persistent storage for binary photo payloads, plus the
//! ingest pipeline that feeds it.
//!
//! The store is a narrow capability handle (`open`/`put`/`photos`/`delete`)
//! over a single SQLite table of immutable records. Callers never touch the
//! storage engine directly; they see an ordered list of viewable photos
//! (newest first) that stays 1:1 with the live records.
//!
//! The ingest pipeline accepts a batch of user-selected files, transcodes
//! the legacy HEIF/HEIC container to JPEG, and persists everything else
//! unchanged. One bad file never aborts the batch.

pub mod convert;
pub mod ingest;
pub mod models;
pub mod schema;
pub mod store;

pub use convert::{is_legacy_container, transcode_to_jpeg, ConversionError, JPEG_QUALITY};
pub use ingest::{ingest_batch, IngestFailure, IngestFile, IngestReport};
pub use models::{PhotoRecord, ViewablePhoto};
pub use schema::init_photo_schema;
pub use store::{PhotoStore, StoreError};
