use crate::error::AppError;

/// Failure classification shared by every store implementation.
///
/// `UniqueViolation` is how a store reports that a natural key already exists.
/// Callers that use it for duplicate suppression must match on the variant,
/// never on the error text.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("invalid record: {0}")]
    Invalid(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl RepositoryError {
    /// Classify a sqlx error, turning unique violations into `UniqueViolation`
    pub fn from_sqlx(err: sqlx::Error, what: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                return RepositoryError::UniqueViolation(what.to_string());
            }
        }
        RepositoryError::Database(err)
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => AppError::NotFound(msg),
            RepositoryError::UniqueViolation(msg) => AppError::Conflict(msg),
            RepositoryError::Invalid(msg) => AppError::BadRequest(msg),
            RepositoryError::Database(e) => AppError::Database(e),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
