pub mod error;
pub mod model;
pub mod service;

pub use error::FeedServiceError;
pub use model::{Feed, FeedDocument, FeedItem};
pub use service::{FeedService, FeedServiceApi};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response for feed endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct FeedResponse {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_fetched_at: Option<DateTime<Utc>>,
}

/// Request to register a new feed
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateFeedRequest {
    pub name: String,
    pub url: String,
    pub user_id: Uuid,
}

impl From<Feed> for FeedResponse {
    fn from(feed: Feed) -> Self {
        Self {
            id: feed.id,
            name: feed.name,
            url: feed.url,
            user_id: feed.user_id,
            created_at: feed.created_at,
            updated_at: feed.updated_at,
            last_fetched_at: feed.last_fetched_at,
        }
    }
}
