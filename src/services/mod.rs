pub mod catalog;
pub mod catalog_client;
pub mod product;

use thiserror::Error;

use crate::source::SourceError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Entity not found")]
    NotFound,

    #[error("Remote source error: {0}")]
    Source(SourceError),

    #[error("Data is not available yet")]
    Unavailable,
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<SourceError> for ServiceError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::NotFound => ServiceError::NotFound,
            other => ServiceError::Source(other),
        }
    }
}
