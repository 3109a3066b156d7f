use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The single user-facing failure for list and detail reads.
    #[error("Failed to load {0}. Please try again.")]
    FetchFailed(&'static str),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Form error: {0}")]
    Form(String),

    #[error(transparent)]
    TypeConstraint(#[from] TypeConstraintError),

    #[error("Internal error")]
    Internal,
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::ValidationError(message) => ServiceError::Form(message),
            RepositoryError::NotFound | RepositoryError::Unavailable(_) => ServiceError::Internal,
        }
    }
}
