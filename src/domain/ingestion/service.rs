use super::error::IngestionError;
use crate::domain::feed::{Feed, FeedItem};
use crate::domain::post::normalize;
use crate::infrastructure::repositories::{
    FeedFetcher, FeedRepository, PostRepository, RepositoryError,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Fetches feeds and stores the posts that are new.
///
/// Cloning is cheap; every collaborator is shared behind an `Arc`.
#[derive(Clone)]
pub struct IngestionService {
    feed_repo: Arc<dyn FeedRepository>,
    post_repo: Arc<dyn PostRepository>,
    fetcher: Option<Arc<dyn FeedFetcher>>,
}

impl IngestionService {
    /// Service without a fetcher. Every ingestion fails with
    /// `FetcherNotConfigured` until one is attached with `with_fetcher`.
    pub fn new(feed_repo: Arc<dyn FeedRepository>, post_repo: Arc<dyn PostRepository>) -> Self {
        Self {
            feed_repo,
            post_repo,
            fetcher: None,
        }
    }

    pub fn with_fetcher(mut self, fetcher: Arc<dyn FeedFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }
}

#[async_trait]
pub trait FeedIngestionApi: Send + Sync {
    /// Ingest one feed and return how many posts were newly stored.
    ///
    /// This operation:
    /// - Stamps the feed as fetched before touching the network
    /// - Fetches and parses the feed once
    /// - Normalizes and stores each item in document order, skipping items
    ///   that fail to normalize, already exist, or are rejected by the store
    ///
    /// # Errors
    /// Only feed-level failures (mark-fetched, missing fetcher, fetch/parse)
    async fn fetch_single_feed(&self, feed: &Feed) -> Result<usize, IngestionError>;

    /// Ingest every feed concurrently and wait for all of them.
    /// Failures are logged per feed and never returned.
    async fn fetch_and_store_feeds(&self, feeds: Vec<Feed>);
}

#[async_trait]
impl FeedIngestionApi for IngestionService {
    async fn fetch_single_feed(&self, feed: &Feed) -> Result<usize, IngestionError> {
        self.feed_repo
            .mark_fetched(feed.id)
            .await
            .map_err(IngestionError::MarkFetched)?;

        let fetcher = self
            .fetcher
            .as_ref()
            .ok_or(IngestionError::FetcherNotConfigured)?;

        let document = fetcher.fetch(&feed.url).await?;

        Ok(self.store_items(feed, document.items).await)
    }

    async fn fetch_and_store_feeds(&self, feeds: Vec<Feed>) {
        let mut tasks = JoinSet::new();
        let mut in_flight = HashMap::with_capacity(feeds.len());

        for feed in feeds {
            let service = self.clone();
            let task_feed = feed.clone();
            let handle = tasks.spawn(async move { service.fetch_single_feed(&task_feed).await });
            in_flight.insert(handle.id(), feed);
        }

        while let Some(joined) = tasks.join_next_with_id().await {
            let (task_id, outcome) = match joined {
                Ok((task_id, result)) => (task_id, Ok(result)),
                Err(err) => (err.id(), Err(err)),
            };
            let Some(feed) = in_flight.remove(&task_id) else {
                continue;
            };

            match outcome {
                Ok(Ok(new_posts)) => {
                    tracing::info!(
                        feed_id = %feed.id,
                        feed_name = %feed.name,
                        new_posts,
                        "Feed collected"
                    );
                }
                Ok(Err(err)) => {
                    tracing::error!(
                        feed_id = %feed.id,
                        feed_name = %feed.name,
                        feed_url = %feed.url,
                        error = %err,
                        "Error fetching feed"
                    );
                }
                Err(err) => {
                    tracing::error!(
                        feed_id = %feed.id,
                        feed_name = %feed.name,
                        feed_url = %feed.url,
                        error = %err,
                        "Feed ingestion task failed"
                    );
                }
            }
        }
    }
}

impl IngestionService {
    async fn store_items(&self, feed: &Feed, items: Vec<FeedItem>) -> usize {
        let mut new_posts = 0;

        for item in items {
            let post = match normalize(item, feed.id) {
                Ok(post) => post,
                Err(err) => {
                    tracing::warn!(feed_id = %feed.id, error = %err, "Skipping RSS item");
                    continue;
                }
            };

            match self.post_repo.create(&post).await {
                Ok(()) => new_posts += 1,
                Err(RepositoryError::UniqueViolation(_)) => {
                    tracing::trace!(feed_id = %feed.id, post_url = %post.url, "Post already stored");
                }
                Err(err) => {
                    tracing::warn!(
                        feed_id = %feed.id,
                        post_url = %post.url,
                        error = %err,
                        "Error creating post"
                    );
                }
            }
        }

        new_posts
    }
}
