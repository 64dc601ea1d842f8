use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub published_at: DateTime<Utc>,
    pub url: String,
    pub feed_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A post ready to be inserted, as produced by the normalizer
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub published_at: DateTime<Utc>,
    pub url: String,
    pub feed_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewPost {
    /// Check the invariants every stored post must satisfy
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("invalid post title".to_string());
        }

        match url::Url::parse(&self.url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.has_host() => {}
            _ => return Err(format!("invalid post URL: {:?}", self.url)),
        }

        if self.feed_id.is_nil() {
            return Err("invalid feed ID".to_string());
        }

        if self.published_at.timestamp() == 0 {
            return Err("invalid published date".to_string());
        }

        Ok(())
    }
}

impl From<NewPost> for Post {
    fn from(post: NewPost) -> Self {
        Self {
            id: post.id,
            title: post.title,
            description: post.description,
            published_at: post.published_at,
            url: post.url,
            feed_id: post.feed_id,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Response item for post listings
#[derive(Debug, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub published_at: DateTime<Utc>,
    pub url: String,
    pub feed_id: Uuid,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            description: post.description,
            published_at: post.published_at,
            url: post.url,
            feed_id: post.feed_id,
        }
    }
}
