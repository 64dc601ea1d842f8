use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::feed::{CreateFeedRequest, FeedResponse, FeedServiceApi};
use crate::domain::ingestion::{FeedIngestionApi, FetchFeedResponse};
use crate::domain::post::{PostResponse, PostService};
use crate::error::AppResult;

#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub struct FeedController {
    feed_service: Arc<dyn FeedServiceApi>,
    ingestion_service: Arc<dyn FeedIngestionApi>,
    post_service: Arc<PostService>,
}

impl FeedController {
    pub fn new(
        feed_service: Arc<dyn FeedServiceApi>,
        ingestion_service: Arc<dyn FeedIngestionApi>,
        post_service: Arc<PostService>,
    ) -> Self {
        Self {
            feed_service,
            ingestion_service,
            post_service,
        }
    }

    /// POST /api/feeds - Register a feed
    pub async fn create_feed(
        State(controller): State<Arc<FeedController>>,
        Json(request): Json<CreateFeedRequest>,
    ) -> AppResult<(StatusCode, Json<FeedResponse>)> {
        let feed = controller.feed_service.create_feed(request).await?;
        Ok((StatusCode::CREATED, Json(feed)))
    }

    /// GET /api/feeds - List every registered feed
    pub async fn list_feeds(
        State(controller): State<Arc<FeedController>>,
    ) -> AppResult<Json<Vec<FeedResponse>>> {
        let feeds = controller.feed_service.list_feeds().await?;
        Ok(Json(feeds))
    }

    /// POST /api/feeds/{feedId}/fetch - Ingest one feed now
    pub async fn fetch_feed(
        State(controller): State<Arc<FeedController>>,
        Path(feed_id): Path<Uuid>,
    ) -> AppResult<Json<FetchFeedResponse>> {
        let feed = controller.feed_service.get_feed(feed_id).await?;

        let new_post_count = controller
            .ingestion_service
            .fetch_single_feed(&feed)
            .await?;

        Ok(Json(FetchFeedResponse {
            message: "Feed fetched successfully".to_string(),
            feed_id,
            new_post_count,
        }))
    }

    /// GET /api/feeds/{feedId}/posts - List a feed's posts, newest first
    pub async fn list_posts(
        State(controller): State<Arc<FeedController>>,
        Path(feed_id): Path<Uuid>,
        Query(pagination): Query<PaginationQuery>,
    ) -> AppResult<Json<Vec<PostResponse>>> {
        let posts = controller
            .post_service
            .get_posts_for_feed(feed_id, pagination.limit, pagination.offset)
            .await?;
        Ok(Json(posts))
    }
}
