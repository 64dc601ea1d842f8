use super::service::FeedIngestionApi;
use crate::domain::feed::FeedServiceApi;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchedulerConfig {
    /// Time between ticks
    pub interval: Duration,
    /// Minimum age of `last_fetched_at` before a feed is selected again
    pub refresh_interval: Duration,
    /// Maximum number of feeds ingested per tick
    pub concurrency: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            refresh_interval: Duration::from_secs(60),
            concurrency: 10,
        }
    }
}

impl SchedulerConfig {
    /// Age passed to selection. Feeds are stamped a little after the tick
    /// that picked them, so half an interval of slack keeps a feed whose
    /// refresh interval matches the tick due on the very next tick.
    pub fn selection_age(&self) -> Duration {
        self.refresh_interval.saturating_sub(self.interval / 2)
    }
}

/// Periodically selects feeds due for refresh and ingests them as one batch
pub struct Scheduler {
    feed_service: Arc<dyn FeedServiceApi>,
    ingestion: Arc<dyn FeedIngestionApi>,
    config: SchedulerConfig,
}

impl Scheduler {
    pub fn new(
        feed_service: Arc<dyn FeedServiceApi>,
        ingestion: Arc<dyn FeedIngestionApi>,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            feed_service,
            ingestion,
            config,
        }
    }

    /// Run a single tick: select a batch and wait until every feed in it is done.
    /// Returns the number of feeds in the batch.
    pub async fn run_tick(&self) -> usize {
        let limit = self.config.concurrency as i64;
        let mut feeds = match self
            .feed_service
            .get_next_feeds_to_fetch(limit, self.config.selection_age())
            .await
        {
            Ok(feeds) => feeds,
            Err(err) => {
                tracing::error!(error = %err, "Error fetching feeds to scrape");
                return 0;
            }
        };

        if feeds.is_empty() {
            tracing::debug!("No feeds due for refresh");
            return 0;
        }

        feeds.truncate(self.config.concurrency);
        let batch_size = feeds.len();

        tracing::info!(feeds = batch_size, "Scraping feeds");
        self.ingestion.fetch_and_store_feeds(feeds).await;

        batch_size
    }

    /// Start the loop on the runtime. The first tick fires one interval after
    /// start; ticks missed while a batch runs are skipped, not queued.
    pub fn spawn(self) -> SchedulerHandle {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let join = tokio::spawn(async move {
            tracing::info!(
                interval = ?self.config.interval,
                refresh_interval = ?self.config.refresh_interval,
                concurrency = self.config.concurrency,
                "Starting RSS scraper"
            );

            let period = self.config.interval;
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = &mut stop_rx => {
                        tracing::info!("RSS scraper shutdown requested");
                        break;
                    }
                    _ = ticker.tick() => {
                        self.run_tick().await;
                    }
                }
            }
        });

        SchedulerHandle { stop_tx, join }
    }
}

/// Handle to a running scheduler. Dropping it also stops the loop.
pub struct SchedulerHandle {
    stop_tx: oneshot::Sender<()>,
    join: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Stop the loop. A batch already in flight finishes first.
    pub async fn stop(self) -> Result<(), tokio::task::JoinError> {
        let _ = self.stop_tx.send(());
        self.join.await
    }
}
