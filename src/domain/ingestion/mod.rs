pub mod error;
pub mod scheduler;
pub mod service;

pub use error::IngestionError;
pub use scheduler::{Scheduler, SchedulerConfig, SchedulerHandle};
pub use service::{FeedIngestionApi, IngestionService};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response for POST /api/feeds/{feedId}/fetch
#[derive(Debug, Serialize, Deserialize)]
pub struct FetchFeedResponse {
    pub message: String,
    pub feed_id: Uuid,
    pub new_post_count: usize,
}
