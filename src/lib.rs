//! Bulk download of xkcd comic records into a flat json store, and lookups against it.
//!
//! A build fetches every identifier in `1..=max_id` with a bounded pool of workers, keeps
//! the records that could be fetched and replaces the store with them. A lookup reads the
//! whole store and scans it for the requested identifier.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod fetcher;
pub mod model;
pub mod progress;
pub mod service;
pub mod store;

pub use config::Config;
pub use error::{Error, FetchError, LookupError, StoreError};
pub use fetcher::{HttpRecordFetcher, RecordFetcher};
pub use model::Record;
pub use service::{RecordService, RecordStoreService};
pub use store::Store;
