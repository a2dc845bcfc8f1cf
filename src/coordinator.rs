use std::sync::Arc;

use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use tokio::sync::mpsc;
use tokio::task::JoinError;
use tracing::{debug, error, info, warn};

use crate::error::FetchError;
use crate::fetcher::RecordFetcher;
use crate::model::Record;

/// Outcome of one fetch as it travels over the fan-in channel. `Err` means the fetch task
/// panicked.
struct Outcome {
    id: u32,
    result: Result<Result<Record, FetchError>, JoinError>,
}

/// Fetches every identifier in `1..=max_id` with at most `concurrency` requests in flight
/// and returns the successful records in completion order.
///
/// Every identifier yields exactly one message on the fan-in channel, so the receive loop
/// stops after `max_id` messages. If the sending side is gone before that, the loop stops
/// early instead of waiting forever.
pub async fn collect_records<F>(
    fetcher: Arc<F>,
    max_id: u32,
    concurrency: usize,
    progress: &ProgressBar,
) -> Vec<Record>
where
    F: RecordFetcher + 'static,
{
    if max_id == 0 {
        return Vec::new();
    }

    let workers = concurrency.clamp(1, max_id as usize);
    let (results_tx, mut results_rx) = mpsc::channel::<Outcome>(workers);
    debug!(max_id, workers, "starting fetches");

    let producer = tokio::spawn(async move {
        let mut outcomes = stream::iter(1..=max_id)
            .map(|id| {
                let fetcher = Arc::clone(&fetcher);
                async move {
                    let result = tokio::spawn(async move { fetcher.fetch(id).await }).await;
                    Outcome { id, result }
                }
            })
            .buffer_unordered(workers);

        while let Some(outcome) = outcomes.next().await {
            if results_tx.send(outcome).await.is_err() {
                break;
            }
        }
    });

    let mut records = Vec::new();
    let mut failed = 0u32;
    for received in 0..max_id {
        match results_rx.recv().await {
            Some(Outcome { result: Ok(Ok(record)), .. }) => records.push(record),
            Some(Outcome { id, result: Ok(Err(_)) }) => {
                debug!(id, "dropping failed fetch");
                failed += 1;
            }
            Some(Outcome { id, result: Err(e) }) => {
                error!(id, error = %e, "fetch task panicked");
                failed += 1;
            }
            None => {
                warn!(received, expected = max_id, "fetches stopped early");
                break;
            }
        }
        progress.inc(1);
    }

    if let Err(e) = producer.await {
        error!(error = %e, "fetch producer panicked");
    }

    info!(fetched = records.len(), failed, "collected records");
    records
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use indicatif::ProgressBar;
    use reqwest::StatusCode;

    use crate::coordinator::collect_records;
    use crate::error::FetchError;
    use crate::fetcher::RecordFetcher;
    use crate::model::Record;

    /// Fails for the listed ids, succeeds with `comic <id>` otherwise.
    struct FakeFetcher {
        failing: HashSet<u32>,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl FakeFetcher {
        fn failing(ids: &[u32]) -> Arc<FakeFetcher> {
            Arc::new(FakeFetcher {
                failing: ids.iter().copied().collect(),
                in_flight: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl RecordFetcher for FakeFetcher {
        async fn fetch(&self, id: u32) -> Result<Record, FetchError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(u64::from(id % 5))).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.failing.contains(&id) {
                Err(FetchError::BadStatus(StatusCode::INTERNAL_SERVER_ERROR))
            } else {
                Ok(Record::new(id, format!("comic {id}")))
            }
        }
    }

    struct PanickingFetcher;

    #[async_trait]
    impl RecordFetcher for PanickingFetcher {
        async fn fetch(&self, _id: u32) -> Result<Record, FetchError> {
            panic!("boom");
        }
    }

    fn ids(records: &[Record]) -> HashSet<u32> {
        records.iter().map(|r| r.id).collect()
    }

    #[tokio::test]
    async fn given_zero_ids_when_collect_then_empty() {
        let fetcher = FakeFetcher::failing(&[]);

        let records = collect_records(fetcher, 0, 4, &ProgressBar::hidden()).await;

        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn given_one_failing_id_when_collect_then_keep_the_others() {
        // Given
        let fetcher = FakeFetcher::failing(&[2]);

        // When
        let records = collect_records(fetcher, 3, 8, &ProgressBar::hidden()).await;

        // Then
        assert_eq!(records.len(), 2);
        assert_eq!(ids(&records), HashSet::from([1, 3]));
    }

    #[tokio::test]
    async fn given_many_ids_when_collect_then_drain_every_result() {
        // Given
        let progress = ProgressBar::hidden();
        let failing = (1..=200).filter(|id| id % 7 == 0).collect::<Vec<_>>();

        // When
        let records = collect_records(FakeFetcher::failing(&failing), 200, 16, &progress).await;

        // Then
        assert_eq!(progress.position(), 200);
        assert_eq!(records.len(), 200 - failing.len());
        assert!(records.iter().all(|r| r.id % 7 != 0));
    }

    #[tokio::test]
    async fn given_concurrency_limit_when_collect_then_never_exceed_it() {
        let fetcher = FakeFetcher::failing(&[]);

        let records = collect_records(Arc::clone(&fetcher), 50, 4, &ProgressBar::hidden()).await;

        assert_eq!(records.len(), 50);
        assert!(fetcher.peak.load(Ordering::SeqCst) <= 4);
    }

    #[tokio::test]
    async fn given_every_fetch_failing_when_collect_then_empty() {
        let failing = (1..=10).collect::<Vec<_>>();
        let fetcher = FakeFetcher::failing(&failing);

        let records = collect_records(fetcher, 10, 3, &ProgressBar::hidden()).await;

        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn given_panicking_fetches_when_collect_then_count_them_and_return() {
        // Given
        let progress = ProgressBar::hidden();

        // When
        let records = tokio::time::timeout(
            Duration::from_secs(5),
            collect_records(Arc::new(PanickingFetcher), 10, 2, &progress),
        )
        .await
        .unwrap();

        // Then
        assert!(records.is_empty());
        assert_eq!(progress.position(), 10);
    }
}
