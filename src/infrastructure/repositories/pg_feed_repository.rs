use super::error::{RepositoryError, RepositoryResult};
use super::feed_repository::FeedRepository;
use crate::domain::feed::Feed;
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// PostgreSQL implementation of the feed repository
pub struct PgFeedRepository {
    pool: Arc<DbPool>,
}

impl PgFeedRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedRepository for PgFeedRepository {
    async fn create(&self, feed: &Feed) -> RepositoryResult<Feed> {
        let pool = self.pool.as_ref();
        let feed = sqlx::query_as::<_, Feed>(
            r#"
            INSERT INTO feeds (id, name, url, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, url, user_id, created_at, updated_at, last_fetched_at
            "#,
        )
        .bind(feed.id)
        .bind(&feed.name)
        .bind(&feed.url)
        .bind(feed.user_id)
        .bind(feed.created_at)
        .bind(feed.updated_at)
        .fetch_one(pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "Feed URL already exists"))?;

        Ok(feed)
    }

    async fn find_by_id(&self, feed_id: Uuid) -> RepositoryResult<Option<Feed>> {
        let pool = self.pool.as_ref();
        let feed = sqlx::query_as::<_, Feed>(
            r#"
            SELECT id, name, url, user_id, created_at, updated_at, last_fetched_at
            FROM feeds
            WHERE id = $1
            "#,
        )
        .bind(feed_id)
        .fetch_optional(pool)
        .await?;

        Ok(feed)
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Feed>> {
        let pool = self.pool.as_ref();
        let feeds = sqlx::query_as::<_, Feed>(
            r#"
            SELECT id, name, url, user_id, created_at, updated_at, last_fetched_at
            FROM feeds
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(feeds)
    }

    async fn find_due_for_refresh(
        &self,
        limit: i64,
        older_than: DateTime<Utc>,
    ) -> RepositoryResult<Vec<Feed>> {
        let pool = self.pool.as_ref();
        let feeds = sqlx::query_as::<_, Feed>(
            r#"
            SELECT id, name, url, user_id, created_at, updated_at, last_fetched_at
            FROM feeds
            WHERE last_fetched_at IS NULL OR last_fetched_at < $2
            ORDER BY last_fetched_at ASC NULLS FIRST
            LIMIT $1
            "#,
        )
        .bind(limit)
        .bind(older_than)
        .fetch_all(pool)
        .await?;

        Ok(feeds)
    }

    async fn mark_fetched(&self, feed_id: Uuid) -> RepositoryResult<Feed> {
        let pool = self.pool.as_ref();
        let now = Utc::now();

        sqlx::query_as::<_, Feed>(
            r#"
            UPDATE feeds
            SET last_fetched_at = $1, updated_at = $1
            WHERE id = $2
            RETURNING id, name, url, user_id, created_at, updated_at, last_fetched_at
            "#,
        )
        .bind(now)
        .bind(feed_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("feed {}", feed_id)))
    }
}
