use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{Error, FetchError};
use crate::model::Record;

/// Fetches one record per identifier. Implementations make a single attempt.
#[async_trait]
pub trait RecordFetcher: Send + Sync {
    async fn fetch(&self, id: u32) -> Result<Record, FetchError>;
}

pub struct HttpRecordFetcher {
    client: Client,
    config: Config,
}

impl HttpRecordFetcher {
    pub fn new(config: Config) -> Result<HttpRecordFetcher, Error> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(HttpRecordFetcher { client, config })
    }

    async fn request(&self, url: &str) -> Result<Record, FetchError> {
        let response = self.client.get(url).send().await?;

        match response.status() {
            StatusCode::OK => {
                let body = response.bytes().await?;
                Ok(serde_json::from_slice::<Record>(&body)?)
            }
            status => Err(FetchError::BadStatus(status)),
        }
    }
}

#[async_trait]
impl RecordFetcher for HttpRecordFetcher {
    async fn fetch(&self, id: u32) -> Result<Record, FetchError> {
        let url = self.config.url_for(id);
        info!(id, url = %url, "getting record");

        let outcome = self.request(&url).await;
        match &outcome {
            Ok(record) if record.id != id => {
                warn!(requested = id, received = record.id, "upstream returned a different id")
            }
            Ok(record) => info!(id = record.id, "successfully got record"),
            Err(e) => warn!(id, url = %url, error = %e, "could not get record"),
        }
        outcome
    }
}
