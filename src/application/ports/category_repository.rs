use async_trait::async_trait;
use thiserror::Error;

use crate::application::dto::CategoryFilter;
use crate::domain::entities::{Category, NewCategory};
use crate::infrastructure::persistence::QueryBuilderError;
#[cfg(test)]
use mockall::automock;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid query: {0}")]
    InvalidQuery(#[from] QueryBuilderError),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Port for category persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Store a new category and return it with its assigned id
    async fn create(&self, category: &NewCategory) -> Result<Category, RepositoryError>;

    /// Replace the fields of an existing category
    async fn update(&self, id: i64, category: &NewCategory) -> Result<Category, RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, RepositoryError>;

    /// List categories matching the optional filters
    async fn find_all(&self, filter: &CategoryFilter) -> Result<Vec<Category>, RepositoryError>;

    /// Delete a category, returning the removed id
    async fn delete(&self, id: i64) -> Result<i64, RepositoryError>;
}
