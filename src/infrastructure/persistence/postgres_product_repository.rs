use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, error};

use super::query_builder::{bind_params, contains_pattern, QueryBuilder};
use crate::application::dto::ProductFilter;
use crate::application::ports::{ProductRepository, RepositoryError};
use crate::domain::entities::{NewProduct, Product};
use crate::domain::value_objects::{Price, Title};

const PRODUCT_SELECT: &str =
    "SELECT id, title, price, description, category_id, image FROM products";

/// Columns a client may sort products by
pub const PRODUCT_SORT_COLUMNS: &[&str] = &["id", "title", "price", "category_id"];

/// Id handed out by simulated creates; the seed data holds twenty products
const SIMULATED_PRODUCT_ID: i64 = 21;

/// Reads go to Postgres; writes are simulated and leave storage untouched.
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, qb: &QueryBuilder) -> Result<Vec<Product>, RepositoryError> {
        let (sql, params) = qb.build();
        debug!(sql = %sql, params = params.len(), "Querying products");

        let rows = bind_params(sqlx::query_as::<_, ProductRow>(&sql), params)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!(sql = %sql, error = %e, "Product query failed");
                e
            })?;

        rows.into_iter().map(|r| r.into_domain()).collect()
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn create(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        debug!(title = %product.title, "Simulated product create");
        Ok(product.clone().into_product(SIMULATED_PRODUCT_ID))
    }

    async fn update(&self, id: i64, product: &NewProduct) -> Result<Product, RepositoryError> {
        debug!(id, title = %product.title, "Simulated product update");
        Ok(product.clone().into_product(id))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, RepositoryError> {
        let mut qb = QueryBuilder::new(PRODUCT_SELECT, PRODUCT_SORT_COLUMNS);
        qb.add_condition("id = ${}", id);
        qb.set_limit(1)?;

        Ok(self.fetch(&qb).await?.into_iter().next())
    }

    async fn find_all(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let mut qb = QueryBuilder::new(PRODUCT_SELECT, PRODUCT_SORT_COLUMNS);

        if let Some(title) = &filter.title {
            qb.add_condition("title ILIKE ${}", contains_pattern(title));
        }
        if let Some(category_id) = filter.category_id {
            qb.add_condition("category_id = ${}", category_id);
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
        debug!(id, "Simulated product delete");
        Ok(id)
    }
}

// Internal row mapping struct
#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    title: String,
    price: f64,
    description: Option<String>,
    category_id: i64,
    image: Option<String>,
}

impl ProductRow {
    fn into_domain(self) -> Result<Product, RepositoryError> {
        let title = Title::new(self.title).map_err(|e| {
            RepositoryError::SerializationError(format!("Invalid title for product {}: {}", self.id, e))
        })?;

        let price = Price::new(self.price).map_err(|e| {
            RepositoryError::SerializationError(format!("Invalid price for product {}: {}", self.id, e))
        })?;

        Ok(Product::new(
            self.id,
            title,
            price,
            self.description,
            self.category_id,
            self.image,
        ))
    }
}
