use crate::error::AppError;
use crate::infrastructure::repositories::{FetchError, RepositoryError};

/// Feed-level ingestion failures. Each one aborts the feed for this cycle;
/// item-level problems never surface here.
#[derive(Debug, thiserror::Error)]
pub enum IngestionError {
    #[error("failed to mark feed as fetched: {0}")]
    MarkFetched(#[source] RepositoryError),

    #[error("no RSS fetcher configured")]
    FetcherNotConfigured,

    #[error("failed to fetch RSS from URL: {0}")]
    Fetch(#[from] FetchError),
}

impl From<IngestionError> for AppError {
    fn from(err: IngestionError) -> Self {
        match err {
            IngestionError::MarkFetched(RepositoryError::NotFound(_)) => {
                AppError::NotFound("Feed not found".to_string())
            }
            IngestionError::Fetch(e) => AppError::ExternalService(format!("Failed to fetch feed: {}", e)),
            other => AppError::Internal(other.to_string()),
        }
    }
}
