//! Application services orchestrating domain logic and side effects.
pub mod images;
pub mod posts;

use crate::domain::{ErrorCode, TypeConstraintError};
use crate::repository::RepositoryError;
use crate::storage::StoreError;

pub use images::ImageService;
pub use posts::PostService;

/// Convenience alias for service results.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by service operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Domain(ErrorCode),
    #[error("invalid form input: {0}")]
    Validation(String),
    #[error("invalid image name")]
    InvalidName(#[source] TypeConstraintError),
    #[error("failed to upload image: {file_name}")]
    UploadFailed {
        file_name: String,
        #[source]
        source: StoreError,
    },
    #[error("failed to delete image")]
    DeleteFailed(#[source] StoreError),
    #[error("persistence failure")]
    Repository(#[source] RepositoryError),
}

impl ServiceError {
    /// Catalog entry describing the failure, when there is one.
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            Self::Domain(code) => Some(*code),
            Self::Validation(_) => Some(ErrorCode::InvalidPostForm),
            _ => None,
        }
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Self::Domain(ErrorCode::NotExistPost),
            RepositoryError::Rejected(code) => Self::Domain(code),
            other => Self::Repository(other),
        }
    }
}

impl From<ErrorCode> for ServiceError {
    fn from(code: ErrorCode) -> Self {
        Self::Domain(code)
    }
}
