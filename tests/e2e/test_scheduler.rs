use crate::e2e::helpers::fixtures::{rss_document, three_rfc822_items, StaticFeedFetcher};
use crate::e2e::helpers::TestContext;
use async_trait::async_trait;
use feed_aggregator::domain::feed::{
    CreateFeedRequest, Feed, FeedResponse, FeedServiceApi, FeedServiceError,
};
use feed_aggregator::domain::ingestion::{
    FeedIngestionApi, IngestionError, Scheduler, SchedulerConfig,
};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

const HOUR: Duration = Duration::from_secs(3600);

fn config(concurrency: usize) -> SchedulerConfig {
    SchedulerConfig {
        interval: Duration::from_millis(50),
        refresh_interval: HOUR,
        concurrency,
    }
}

fn feed_url(n: usize) -> String {
    format!("https://feeds.example.com/{}/rss", n)
}

/// Context with `count` registered feeds, each serving three items
async fn context_with_feeds(count: usize) -> (TestContext, Vec<Feed>) {
    let body = rss_document("Batch", &three_rfc822_items());
    let fetcher = (0..count).fold(StaticFeedFetcher::new(), |fetcher, n| {
        fetcher.with_body(&feed_url(n), &body)
    });
    let ctx = TestContext::with_fetcher(Some(Arc::new(fetcher))).await;

    let mut feeds = Vec::with_capacity(count);
    for n in 0..count {
        feeds.push(ctx.register_feed(&format!("Feed {}", n), &feed_url(n)).await);
    }
    (ctx, feeds)
}

/// Returns a fixed selection regardless of the requested limit
struct FixedFeedService {
    feeds: Vec<Feed>,
    fail: bool,
}

#[async_trait]
impl FeedServiceApi for FixedFeedService {
    async fn create_feed(&self, _request: CreateFeedRequest) -> Result<FeedResponse, FeedServiceError> {
        unimplemented!("not used by the scheduler")
    }

    async fn get_feed(&self, _feed_id: Uuid) -> Result<Feed, FeedServiceError> {
        unimplemented!("not used by the scheduler")
    }

    async fn list_feeds(&self) -> Result<Vec<FeedResponse>, FeedServiceError> {
        unimplemented!("not used by the scheduler")
    }

    async fn get_next_feeds_to_fetch(
        &self,
        _limit: i64,
        _refresh_interval: Duration,
    ) -> Result<Vec<Feed>, FeedServiceError> {
        if self.fail {
            return Err(FeedServiceError::Dependency("database unavailable".to_string()));
        }
        Ok(self.feeds.clone())
    }
}

/// Records every batch it is handed
#[derive(Default)]
struct RecordingIngestion {
    batches: Mutex<Vec<Vec<Uuid>>>,
}

#[async_trait]
impl FeedIngestionApi for RecordingIngestion {
    async fn fetch_single_feed(&self, _feed: &Feed) -> Result<usize, IngestionError> {
        Ok(0)
    }

    async fn fetch_and_store_feeds(&self, feeds: Vec<Feed>) {
        self.batches
            .lock()
            .push(feeds.iter().map(|feed| feed.id).collect());
    }
}

fn unsaved_feeds(count: usize) -> Vec<Feed> {
    (0..count)
        .map(|n| Feed::new(&format!("Feed {}", n), &feed_url(n), Uuid::new_v4()))
        .collect()
}

#[tokio::test]
async fn test_tick_ingests_at_most_concurrency_feeds() {
    let (ctx, _) = context_with_feeds(15).await;
    let scheduler = Scheduler::new(ctx.feed_service.clone(), ctx.ingestion.clone(), config(10));

    let first = scheduler.run_tick().await;
    assert_eq!(first, 10);
    assert_eq!(ctx.feed_repo.mark_fetched_calls(), 10);
    assert_eq!(ctx.post_repo.count(), 30);

    // The remaining five were never fetched, the first ten are now fresh
    let second = scheduler.run_tick().await;
    assert_eq!(second, 5);
    assert_eq!(ctx.post_repo.count(), 45);
}

#[tokio::test]
async fn test_recently_fetched_feeds_are_not_selected() {
    let (ctx, _) = context_with_feeds(0).await;
    ctx.register_fetched_feed("Fresh", &feed_url(0), chrono::Duration::minutes(5));
    let stale = ctx.register_fetched_feed("Stale", &feed_url(1), chrono::Duration::hours(2));

    let selected = ctx
        .feed_service
        .get_next_feeds_to_fetch(10, HOUR)
        .await
        .unwrap();

    let ids: Vec<Uuid> = selected.iter().map(|feed| feed.id).collect();
    assert_eq!(ids, vec![stale.id]);
}

#[tokio::test]
async fn test_never_fetched_feeds_come_first() {
    let (ctx, _) = context_with_feeds(0).await;
    let oldest = ctx.register_fetched_feed("Oldest", &feed_url(0), chrono::Duration::days(3));
    let older = ctx.register_fetched_feed("Older", &feed_url(1), chrono::Duration::hours(2));
    let never = ctx.register_feed("Never", &feed_url(2)).await;

    let selected = ctx
        .feed_service
        .get_next_feeds_to_fetch(10, HOUR)
        .await
        .unwrap();

    let ids: Vec<Uuid> = selected.iter().map(|feed| feed.id).collect();
    assert_eq!(ids, vec![never.id, oldest.id, older.id]);
}

#[tokio::test]
async fn test_non_positive_limit_selects_default_batch() {
    let (ctx, _) = context_with_feeds(12).await;

    let selected = ctx
        .feed_service
        .get_next_feeds_to_fetch(0, HOUR)
        .await
        .unwrap();

    assert_eq!(selected.len(), 10);
}

#[tokio::test]
async fn test_tick_with_nothing_due_does_nothing() {
    let (ctx, _) = context_with_feeds(0).await;
    ctx.register_fetched_feed("Fresh", &feed_url(0), chrono::Duration::minutes(1));
    let scheduler = Scheduler::new(ctx.feed_service.clone(), ctx.ingestion.clone(), config(10));

    assert_eq!(scheduler.run_tick().await, 0);
    assert_eq!(ctx.feed_repo.mark_fetched_calls(), 0);
}

#[tokio::test]
async fn test_tick_truncates_oversized_selection() {
    let feeds = unsaved_feeds(7);
    let expected: Vec<Uuid> = feeds.iter().take(3).map(|feed| feed.id).collect();
    let ingestion = Arc::new(RecordingIngestion::default());
    let scheduler = Scheduler::new(
        Arc::new(FixedFeedService { feeds, fail: false }),
        ingestion.clone(),
        config(3),
    );

    assert_eq!(scheduler.run_tick().await, 3);

    let batches = ingestion.batches.lock();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0], expected);
}

#[tokio::test]
async fn test_selection_error_skips_the_tick() {
    let ingestion = Arc::new(RecordingIngestion::default());
    let scheduler = Scheduler::new(
        Arc::new(FixedFeedService {
            feeds: unsaved_feeds(2),
            fail: true,
        }),
        ingestion.clone(),
        config(10),
    );

    assert_eq!(scheduler.run_tick().await, 0);
    assert!(ingestion.batches.lock().is_empty());
}

#[tokio::test]
async fn test_spawned_scheduler_ingests_until_stopped() {
    let (ctx, feeds) = context_with_feeds(1).await;
    let handle =
        Scheduler::new(ctx.feed_service.clone(), ctx.ingestion.clone(), config(10)).spawn();

    tokio::time::sleep(Duration::from_millis(300)).await;
    handle.stop().await.expect("scheduler task panicked");

    // Later ticks find the feed fresh and leave it alone
    assert_eq!(ctx.feed_repo.mark_fetched_calls(), 1);
    assert_eq!(ctx.post_repo.posts_for(feeds[0].id).len(), 3);

    let calls_after_stop = ctx.feed_repo.mark_fetched_calls();
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(ctx.feed_repo.mark_fetched_calls(), calls_after_stop);
}

#[tokio::test]
async fn test_refresh_equal_to_interval_fetches_on_every_tick() {
    let (ctx, _) = context_with_feeds(1).await;
    let period = Duration::from_millis(100);
    let handle = Scheduler::new(
        ctx.feed_service.clone(),
        ctx.ingestion.clone(),
        SchedulerConfig {
            interval: period,
            refresh_interval: period,
            concurrency: 10,
        },
    )
    .spawn();

    // Ticks at 100ms..1000ms
    tokio::time::sleep(Duration::from_millis(1050)).await;
    handle.stop().await.expect("scheduler task panicked");

    let calls = ctx.feed_repo.mark_fetched_calls();
    assert!(
        (8..=10).contains(&calls),
        "expected one fetch per tick, got {}",
        calls
    );
}

#[tokio::test]
async fn test_first_tick_waits_one_interval() {
    let (ctx, _) = context_with_feeds(1).await;
    let handle = Scheduler::new(
        ctx.feed_service.clone(),
        ctx.ingestion.clone(),
        SchedulerConfig {
            interval: HOUR,
            ..config(10)
        },
    )
    .spawn();

    tokio::time::sleep(Duration::from_millis(100)).await;
    handle.stop().await.expect("scheduler task panicked");

    assert_eq!(ctx.feed_repo.mark_fetched_calls(), 0);
}
