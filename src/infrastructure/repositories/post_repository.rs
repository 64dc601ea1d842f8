use super::error::RepositoryResult;
use crate::domain::post::{NewPost, Post};
use async_trait::async_trait;
use uuid::Uuid;

/// Persistence for posts collected from feeds.
///
/// Uniqueness of `(feed_id, url)` is enforced here and nowhere else: storing
/// a post whose natural key already exists must fail with `UniqueViolation`.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a post after checking `NewPost::validate`.
    ///
    /// # Errors
    /// - `UniqueViolation` if the feed already has a post with this URL
    /// - `Invalid` if the record breaks a post invariant
    /// - `Database` for anything else
    async fn create(&self, post: &NewPost) -> RepositoryResult<()>;

    /// Posts of one feed, newest publish date first
    async fn find_by_feed(&self, feed_id: Uuid, limit: i64, offset: i64)
        -> RepositoryResult<Vec<Post>>;
}
