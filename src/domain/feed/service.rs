use super::error::FeedServiceError;
use crate::domain::feed::{CreateFeedRequest, Feed, FeedResponse};
use crate::infrastructure::repositories::FeedRepository;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

const DEFAULT_BATCH_SIZE: i64 = 10;

pub struct FeedService {
    feed_repo: Arc<dyn FeedRepository>,
}

impl FeedService {
    pub fn new(feed_repo: Arc<dyn FeedRepository>) -> Self {
        Self { feed_repo }
    }
}

#[async_trait]
pub trait FeedServiceApi: Send + Sync {
    async fn create_feed(&self, request: CreateFeedRequest) -> Result<FeedResponse, FeedServiceError>;

    async fn get_feed(&self, feed_id: Uuid) -> Result<Feed, FeedServiceError>;

    async fn list_feeds(&self) -> Result<Vec<FeedResponse>, FeedServiceError>;

    /// Up to `limit` feeds that were never fetched or not fetched within `refresh_interval`.
    /// A non-positive limit falls back to 10.
    async fn get_next_feeds_to_fetch(
        &self,
        limit: i64,
        refresh_interval: Duration,
    ) -> Result<Vec<Feed>, FeedServiceError>;
}

#[async_trait]
impl FeedServiceApi for FeedService {
    async fn create_feed(&self, request: CreateFeedRequest) -> Result<FeedResponse, FeedServiceError> {
        let feed = Feed::new(request.name.trim(), request.url.trim(), request.user_id);
        feed.validate()?;

        let feed = self.feed_repo.create(&feed).await?;

        tracing::info!(feed_id = %feed.id, feed_url = %feed.url, "Feed registered");

        Ok(FeedResponse::from(feed))
    }

    async fn get_feed(&self, feed_id: Uuid) -> Result<Feed, FeedServiceError> {
        self.feed_repo
            .find_by_id(feed_id)
            .await?
            .ok_or(FeedServiceError::NotFound)
    }

    async fn list_feeds(&self) -> Result<Vec<FeedResponse>, FeedServiceError> {
        let feeds = self.feed_repo.find_all().await?;
        Ok(feeds.into_iter().map(FeedResponse::from).collect())
    }

    async fn get_next_feeds_to_fetch(
        &self,
        limit: i64,
        refresh_interval: Duration,
    ) -> Result<Vec<Feed>, FeedServiceError> {
        let limit = if limit <= 0 { DEFAULT_BATCH_SIZE } else { limit };

        let refresh_interval = chrono::Duration::from_std(refresh_interval)
            .map_err(|e| FeedServiceError::Invalid(format!("refresh interval out of range: {}", e)))?;
        let older_than = Utc::now() - refresh_interval;

        let mut feeds = self.feed_repo.find_due_for_refresh(limit, older_than).await?;
        feeds.truncate(limit as usize);

        Ok(feeds)
    }
}
