use super::error::{RepositoryError, RepositoryResult};
use super::post_repository::PostRepository;
use crate::domain::post::{NewPost, Post};
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// PostgreSQL implementation of the post repository.
/// Relies on the `posts_feed_id_url_key` unique index for duplicate detection.
pub struct PgPostRepository {
    pool: Arc<DbPool>,
}

impl PgPostRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn create(&self, post: &NewPost) -> RepositoryResult<()> {
        post.validate().map_err(RepositoryError::Invalid)?;

        let pool = self.pool.as_ref();
        sqlx::query(
            r#"
            INSERT INTO posts (id, title, description, published_at, url, feed_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(post.id)
        .bind(&post.title)
        .bind(&post.description)
        .bind(post.published_at)
        .bind(&post.url)
        .bind(post.feed_id)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "Post already exists for this feed"))?;

        Ok(())
    }

    async fn find_by_feed(
        &self,
        feed_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> RepositoryResult<Vec<Post>> {
        let pool = self.pool.as_ref();
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, description, published_at, url, feed_id, created_at, updated_at
            FROM posts
            WHERE feed_id = $1
            ORDER BY published_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(feed_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(posts)
    }
}
