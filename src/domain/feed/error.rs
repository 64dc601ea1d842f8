use crate::error::AppError;
use crate::infrastructure::repositories::RepositoryError;

#[derive(Debug, thiserror::Error)]
pub enum FeedServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("feed not found")]
    NotFound,
    #[error("feed already exists")]
    Conflict,
}

impl From<RepositoryError> for FeedServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(_) => FeedServiceError::NotFound,
            RepositoryError::UniqueViolation(_) => FeedServiceError::Conflict,
            RepositoryError::Invalid(msg) => FeedServiceError::Invalid(msg),
            RepositoryError::Database(e) => FeedServiceError::Dependency(e.to_string()),
        }
    }
}

impl From<FeedServiceError> for AppError {
    fn from(err: FeedServiceError) -> Self {
        match err {
            FeedServiceError::Invalid(msg) => AppError::BadRequest(msg),
            FeedServiceError::NotFound => AppError::NotFound("Feed not found".to_string()),
            FeedServiceError::Conflict => AppError::Conflict("Feed URL already exists".to_string()),
            FeedServiceError::Dependency(msg) => AppError::Internal(msg),
        }
    }
}
