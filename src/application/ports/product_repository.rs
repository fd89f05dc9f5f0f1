use async_trait::async_trait;

use super::RepositoryError;
use crate::application::dto::ProductFilter;
use crate::domain::entities::{NewProduct, Product};
#[cfg(test)]
use mockall::automock;

/// Port for product persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Store a new product and return it with its assigned id
    async fn create(&self, product: &NewProduct) -> Result<Product, RepositoryError>;

    /// Replace the fields of an existing product
    async fn update(&self, id: i64, product: &NewProduct) -> Result<Product, RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, RepositoryError>;

    /// List products matching the optional filters
    async fn find_all(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError>;

    /// Delete a product, returning the removed id
    async fn delete(&self, id: i64) -> Result<i64, RepositoryError>;
}
