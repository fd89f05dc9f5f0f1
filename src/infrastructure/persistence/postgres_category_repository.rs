use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, error};

use super::query_builder::{bind_params, contains_pattern, QueryBuilder};
use crate::application::dto::CategoryFilter;
use crate::application::ports::{CategoryRepository, RepositoryError};
use crate::domain::entities::{Category, NewCategory};
use crate::domain::value_objects::Title;

const CATEGORY_SELECT: &str = "SELECT id, title, description, image FROM categories";

/// Columns a client may sort categories by
pub const CATEGORY_SORT_COLUMNS: &[&str] = &["id", "title"];

/// Id handed out by simulated creates; the seed data holds ten categories
const SIMULATED_CATEGORY_ID: i64 = 11;

/// Reads go to Postgres; writes are simulated and leave storage untouched.
pub struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, qb: &QueryBuilder) -> Result<Vec<Category>, RepositoryError> {
        let (sql, params) = qb.build();
        debug!(sql = %sql, params = params.len(), "Querying categories");

        let rows = bind_params(sqlx::query_as::<_, CategoryRow>(&sql), params)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!(sql = %sql, error = %e, "Category query failed");
                e
            })?;

        rows.into_iter().map(|r| r.into_domain()).collect()
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn create(&self, category: &NewCategory) -> Result<Category, RepositoryError> {
        debug!(title = %category.title, "Simulated category create");
        Ok(category.clone().into_category(SIMULATED_CATEGORY_ID))
    }

    async fn update(&self, id: i64, category: &NewCategory) -> Result<Category, RepositoryError> {
        debug!(id, title = %category.title, "Simulated category update");
        Ok(category.clone().into_category(id))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, RepositoryError> {
        let mut qb = QueryBuilder::new(CATEGORY_SELECT, CATEGORY_SORT_COLUMNS);
        qb.add_condition("id = ${}", id);
        qb.set_limit(1)?;

        Ok(self.fetch(&qb).await?.into_iter().next())
    }

    async fn find_all(&self, filter: &CategoryFilter) -> Result<Vec<Category>, RepositoryError> {
        let mut qb = QueryBuilder::new(CATEGORY_SELECT, CATEGORY_SORT_COLUMNS);

        if let Some(title) = &filter.title {
            qb.add_condition("title ILIKE ${}", contains_pattern(title));
        }
        if let Some(sort_by) = &filter.sort_by {
            qb.set_sort_by(sort_by)?;
        }
        if let Some(limit) = filter.limit {
            qb.set_limit(limit)?;
        }

        self.fetch(&qb).await
    }

    async fn delete(&self, id: i64) -> Result<i64, RepositoryError> {
        debug!(id, "Simulated category delete");
        Ok(id)
    }
}

// Internal row mapping struct
#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: i64,
    title: String,
    description: Option<String>,
    image: Option<String>,
}

impl CategoryRow {
    fn into_domain(self) -> Result<Category, RepositoryError> {
        let title = Title::new(self.title).map_err(|e| {
            RepositoryError::SerializationError(format!("Invalid title for category {}: {}", self.id, e))
        })?;

        Ok(Category::new(self.id, title, self.description, self.image))
    }
}
