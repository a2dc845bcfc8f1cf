use std::sync::Arc;

use async_trait::async_trait;
use indicatif::ProgressBar;
use tracing::info;

use crate::config::Config;
use crate::coordinator::collect_records;
use crate::error::{Error, LookupError, StoreError};
use crate::fetcher::{HttpRecordFetcher, RecordFetcher};
use crate::model::Record;
use crate::progress::ProgressHelper;
use crate::store::Store;

#[async_trait]
pub trait RecordService {
    /// Fetches every record and replaces the store with the successful ones.
    async fn build(&self, progress: &ProgressBar) -> Result<Vec<Record>, StoreError>;

    fn lookup(&self, id: u32) -> Result<Record, LookupError>;
}

pub struct RecordStoreService<F> {
    fetcher: Arc<F>,
    store: Store,
    config: Config,
}

impl RecordStoreService<HttpRecordFetcher> {
    pub fn from_config(config: Config) -> Result<Self, Error> {
        let fetcher = HttpRecordFetcher::new(config.clone())?;
        Ok(RecordStoreService::new(fetcher, config))
    }
}

impl<F: RecordFetcher + 'static> RecordStoreService<F> {
    pub fn new(fetcher: F, config: Config) -> Self {
        RecordStoreService {
            fetcher: Arc::new(fetcher),
            store: Store::new(config.store_path.clone()),
            config,
        }
    }

    pub fn progress_bar(&self) -> Result<ProgressBar, Error> {
        ProgressHelper::create(
            u64::from(self.config.max_id),
            format!("Fetching {} records", self.config.max_id),
        )
    }
}

#[async_trait]
impl<F: RecordFetcher + 'static> RecordService for RecordStoreService<F> {
    async fn build(&self, progress: &ProgressBar) -> Result<Vec<Record>, StoreError> {
        info!(max_id = self.config.max_id, workers = self.config.workers(), "building store");
        let records = collect_records(
            Arc::clone(&self.fetcher),
            self.config.max_id,
            self.config.workers(),
            progress,
        )
        .await;
        progress.finish_with_message(format!("Fetched {} records", records.len()));

        self.store.write(&records)?;
        Ok(records)
    }

    fn lookup(&self, id: u32) -> Result<Record, LookupError> {
        self.store.lookup(id)
    }
}
