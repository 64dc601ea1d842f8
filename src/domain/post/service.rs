use super::model::PostResponse;
use crate::error::{AppError, AppResult};
use crate::infrastructure::repositories::PostRepository;
use std::sync::Arc;
use uuid::Uuid;

const DEFAULT_PAGE_SIZE: i64 = 10;
const MAX_PAGE_SIZE: i64 = 100;

pub struct PostService {
    post_repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(post_repo: Arc<dyn PostRepository>) -> Self {
        Self { post_repo }
    }

    /// Posts of a feed, newest first. `limit` is clamped to 1..=100 (default 10)
    /// and a negative `offset` starts from the beginning.
    pub async fn get_posts_for_feed(
        &self,
        feed_id: Uuid,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> AppResult<Vec<PostResponse>> {
        if feed_id.is_nil() {
            return Err(AppError::BadRequest("Invalid feed ID".to_string()));
        }

        let (limit, offset) = page_bounds(limit, offset);

        let posts = self.post_repo.find_by_feed(feed_id, limit, offset).await?;

        Ok(posts.into_iter().map(PostResponse::from).collect())
    }
}

fn page_bounds(limit: Option<i64>, offset: Option<i64>) -> (i64, i64) {
    let limit = match limit {
        Some(limit) if limit > MAX_PAGE_SIZE => MAX_PAGE_SIZE,
        Some(limit) if limit > 0 => limit,
        _ => DEFAULT_PAGE_SIZE,
    };
    let offset = offset.unwrap_or(0).max(0);
    (limit, offset)
}
