use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::error::FeedServiceError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Feed {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_fetched_at: Option<DateTime<Utc>>,
}

impl Feed {
    pub fn new(name: &str, url: &str, user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            url: url.to_string(),
            user_id,
            created_at: now,
            updated_at: now,
            last_fetched_at: None,
        }
    }

    /// Check the name is present and the address is an absolute http(s) URL
    pub fn validate(&self) -> Result<(), FeedServiceError> {
        if self.name.trim().is_empty() {
            return Err(FeedServiceError::Invalid("Feed name is required".to_string()));
        }

        match url::Url::parse(&self.url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.has_host() => Ok(()),
            _ => Err(FeedServiceError::Invalid("Invalid URL format".to_string())),
        }
    }
}

/// Parsed syndication document, produced fresh on every fetch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedDocument {
    pub title: String,
    pub link: String,
    pub description: String,
    pub items: Vec<FeedItem>,
}

/// One raw `<item>` as the source provided it; `pub_date` is not guaranteed to be in any format
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub description: String,
    pub pub_date: String,
}
