use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::postgres_category_repository::CATEGORY_SORT_COLUMNS;
use super::query_builder::{QueryBuilderError, SortClause, SortDirection};
use super::seed_data;
use crate::application::dto::CategoryFilter;
use crate::application::ports::{CategoryRepository, RepositoryError};
use crate::domain::entities::{Category, NewCategory};
use crate::domain::errors::DomainError;

/// Category store kept in process memory
///
/// Applies the same filter, sort allow-list and limit rules as the
/// Postgres repository, but writes really change the stored set.
#[derive(Default)]
pub struct InMemoryCategoryRepository {
    store: RwLock<CategoryStore>,
}

/// Rows plus the id sequence; ids are never reused, even after deletes
#[derive(Default)]
struct CategoryStore {
    rows: BTreeMap<i64, Category>,
    last_id: i64,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-filled with the catalog seed data
    pub fn seeded() -> Result<Self, DomainError> {
        let rows: BTreeMap<i64, Category> = seed_data::categories()?
            .into_iter()
            .map(|c| (c.id(), c))
            .collect();
        let last_id = rows.keys().next_back().copied().unwrap_or(0);

        Ok(Self {
            store: RwLock::new(CategoryStore { rows, last_id }),
        })
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn create(&self, category: &NewCategory) -> Result<Category, RepositoryError> {
        let mut store = self.store.write();
        store.last_id += 1;
        let id = store.last_id;
        let category = category.clone().into_category(id);
        store.rows.insert(id, category.clone());
        Ok(category)
    }

    async fn update(&self, id: i64, category: &NewCategory) -> Result<Category, RepositoryError> {
        let mut store = self.store.write();
        let slot = store
            .rows
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound(format!("category {}", id)))?;
        *slot = category.clone().into_category(id);
        Ok(slot.clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, RepositoryError> {
        Ok(self.store.read().rows.get(&id).cloned())
    }

    async fn find_all(&self, filter: &CategoryFilter) -> Result<Vec<Category>, RepositoryError> {
        let sort = filter
            .sort_by
            .as_deref()
            .map(|s| SortClause::parse(s, CATEGORY_SORT_COLUMNS))
            .transpose()?;
        if let Some(limit) = filter.limit.filter(|l| *l < 0) {
            return Err(QueryBuilderError::NegativeLimit(limit).into());
        }

        let needle = filter.title.as_ref().map(|t| t.to_lowercase());
        let mut found: Vec<Category> = self
            .store
            .read()
            .rows
            .values()
            .filter(|c| match &needle {
                Some(needle) => c.title().as_str().to_lowercase().contains(needle),
                None => true,
            })
            .cloned()
            .collect();

        if let Some(sort) = sort {
            found.sort_by(|a, b| {
                let ordering = match sort.column() {
                    "title" => a.title().as_str().cmp(b.title().as_str()),
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
            .map(|c| c.id())
            .ok_or_else(|| RepositoryError::NotFound(format!("category {}", id)))
    }
}
