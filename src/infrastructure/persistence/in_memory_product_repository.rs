use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::postgres_product_repository::PRODUCT_SORT_COLUMNS;
use super::query_builder::{QueryBuilderError, SortClause, SortDirection};
use super::seed_data;
use crate::application::dto::ProductFilter;
use crate::application::ports::{ProductRepository, RepositoryError};
use crate::domain::entities::{NewProduct, Product};
use crate::domain::errors::DomainError;

/// Product store kept in process memory
#[derive(Default)]
pub struct InMemoryProductRepository {
    store: RwLock<ProductStore>,
}

/// Rows plus the id sequence; ids are never reused, even after deletes
#[derive(Default)]
struct ProductStore {
    rows: BTreeMap<i64, Product>,
    last_id: i64,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-filled with the catalog seed data
    pub fn seeded() -> Result<Self, DomainError> {
        let rows: BTreeMap<i64, Product> = seed_data::products()?
            .into_iter()
            .map(|p| (p.id(), p))
            .collect();
        let last_id = rows.keys().next_back().copied().unwrap_or(0);

        Ok(Self {
            store: RwLock::new(ProductStore { rows, last_id }),
        })
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        let mut store = self.store.write();
        store.last_id += 1;
        let id = store.last_id;
        let product = product.clone().into_product(id);
        store.rows.insert(id, product.clone());
        Ok(product)
    }

    async fn update(&self, id: i64, product: &NewProduct) -> Result<Product, RepositoryError> {
        let mut store = self.store.write();
        let slot = store
            .rows
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound(format!("product {}", id)))?;
        *slot = product.clone().into_product(id);
        Ok(slot.clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, RepositoryError> {
        Ok(self.store.read().rows.get(&id).cloned())
    }

    async fn find_all(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let sort = filter
            .sort_by
            .as_deref()
            .map(|s| SortClause::parse(s, PRODUCT_SORT_COLUMNS))
            .transpose()?;
        if let Some(limit) = filter.limit.filter(|l| *l < 0) {
            return Err(QueryBuilderError::NegativeLimit(limit).into());
        }

        let needle = filter.title.as_ref().map(|t| t.to_lowercase());
        let mut found: Vec<Product> = self
            .store
            .read()
            .rows
            .values()
            .filter(|p| match &needle {
                Some(needle) => p.title().as_str().to_lowercase().contains(needle),
                None => true,
            })
            .filter(|p| filter.category_id.map_or(true, |id| p.category_id() == id))
            .cloned()
            .collect();

        if let Some(sort) = sort {
            found.sort_by(|a, b| {
                let ordering = match sort.column() {
                    "title" => a.title().as_str().cmp(b.title().as_str()),
                    "price" => a.price().value().total_cmp(&b.price().value()),
                    "category_id" => a.category_id().cmp(&b.category_id()),
                    _ => a.id().cmp(&b.id()),
                };
                match sort.direction() {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        if let Some(limit) = filter.limit {
            found.truncate(limit as usize);
        }

        Ok(found)
    }

    async fn delete(&self, id: i64) -> Result<i64, RepositoryError> {
        self.store
            .write()
            .rows
            .remove(&id)
            .map(|p| p.id())
            .ok_or_else(|| RepositoryError::NotFound(format!("product {}", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_title_and_category_filters_combine() {
        let repo = InMemoryProductRepository::seeded().unwrap();
        let found = repo
            .find_all(&ProductFilter {
                title: Some("bar".to_string()),
                category_id: Some(8),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title().as_str(), "Dark Chocolate Bar");
    }

    #[tokio::test]
    async fn test_sort_by_price_descending() {
        let repo = InMemoryProductRepository::seeded().unwrap();
        let found = repo
            .find_all(&ProductFilter {
                sort_by: Some("price DESC".to_string()),
                limit: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();

        let ids: Vec<i64> = found.iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec![1, 6]);
    }

    #[tokio::test]
    async fn test_zero_limit_returns_nothing() {
        let repo = InMemoryProductRepository::seeded().unwrap();
        let found = repo
            .find_all(&ProductFilter {
                limit: Some(0),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let repo = InMemoryProductRepository::seeded().unwrap();
        let product = repo.find_by_id(1).await.unwrap().unwrap();
        let draft = NewProduct {
            title: product.title().clone(),
            price: product.price(),
            description: None,
            category_id: product.category_id(),
            image: None,
        };

        assert!(matches!(
            repo.update(404, &draft).await,
            Err(RepositoryError::NotFound(_))
        ));
        assert_eq!(repo.create(&draft).await.unwrap().id(), 21);
    }

    #[tokio::test]
    async fn test_deleted_ids_are_not_reissued() {
        let repo = InMemoryProductRepository::seeded().unwrap();
        let product = repo.find_by_id(20).await.unwrap().unwrap();
        let draft = NewProduct {
            title: product.title().clone(),
            price: product.price(),
            description: None,
            category_id: product.category_id(),
            image: None,
        };

        assert_eq!(repo.delete(20).await.unwrap(), 20);
        let created = repo.create(&draft).await.unwrap();

        assert_eq!(created.id(), 21);
        assert!(repo.find_by_id(20).await.unwrap().is_none());
    }
}
