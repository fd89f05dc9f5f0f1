//! Error type shared by the catalog use cases

use thiserror::Error;

use crate::application::ports::RepositoryError;
use crate::domain::errors::DomainError;

/// Common error type for category and product use cases
#[derive(Debug, Error)]
pub enum CatalogUseCaseError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),
}
