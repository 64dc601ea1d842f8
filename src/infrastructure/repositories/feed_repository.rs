use super::error::RepositoryResult;
use crate::domain::feed::Feed;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Persistence for registered feeds.
///
/// Implementations must be safe to share between concurrently running
/// ingestion tasks.
#[async_trait]
pub trait FeedRepository: Send + Sync {
    /// Insert a new feed. A second feed with the same URL is a `UniqueViolation`.
    async fn create(&self, feed: &Feed) -> RepositoryResult<Feed>;

    async fn find_by_id(&self, feed_id: Uuid) -> RepositoryResult<Option<Feed>>;

    /// Every registered feed, oldest registration first
    async fn find_all(&self) -> RepositoryResult<Vec<Feed>>;

    /// Feeds never fetched, or last fetched before `older_than`, at most `limit` of them.
    ///
    /// Never-fetched feeds come first, then the ones fetched longest ago.
    async fn find_due_for_refresh(
        &self,
        limit: i64,
        older_than: DateTime<Utc>,
    ) -> RepositoryResult<Vec<Feed>>;

    /// Stamp `last_fetched_at` and `updated_at` with the current time.
    ///
    /// # Errors
    /// `NotFound` if no feed has this id
    async fn mark_fetched(&self, feed_id: Uuid) -> RepositoryResult<Feed>;
}
