use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::api::router::AppState;
use crate::application::{
    ports::{CategoryRepository, ProductRepository},
    use_cases::{
        CreateCategoryUseCase, CreateProductUseCase, DeleteCategoryUseCase, DeleteProductUseCase,
        GetCategoryUseCase, GetProductUseCase, ListCategoriesUseCase, ListProductsUseCase,
        UpdateCategoryUseCase, UpdateProductUseCase,
    },
};
use crate::config::{Config, StorageBackend};
use crate::infrastructure::persistence::{
    InMemoryCategoryRepository, InMemoryProductRepository, PostgresCategoryRepository,
    PostgresProductRepository,
};

/// Application builder for clean dependency injection and setup
pub struct ApplicationBuilder {
    config: Config,
    pool: Option<sqlx::PgPool>,
    category_repo: Option<Arc<dyn CategoryRepository>>,
    product_repo: Option<Arc<dyn ProductRepository>>,
}

impl ApplicationBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            pool: None,
            category_repo: None,
            product_repo: None,
        }
    }

    /// Initialize database connection pool with retry logic
    ///
    /// Does nothing for the in-memory backend.
    pub async fn with_database(mut self) -> Result<Self, Box<dyn std::error::Error>> {
        if self.config.storage_backend == StorageBackend::Memory {
            info!("In-memory storage selected, skipping database setup");
            return Ok(self);
        }

        info!("Connecting to database");

        // Retry connection with exponential backoff
        let mut retries = 3;
        let mut delay = Duration::from_secs(1);
        let pool = loop {
            match PgPoolOptions::new()
                .max_connections(self.config.db_max_connections)
                .min_connections(self.config.db_min_connections)
                .acquire_timeout(Duration::from_secs(self.config.db_acquire_timeout_secs))
                .idle_timeout(Some(Duration::from_secs(self.config.db_idle_timeout_secs)))
                .max_lifetime(Some(Duration::from_secs(self.config.db_max_lifetime_secs)))
                .connect(&self.config.database_url)
                .await
            {
                Ok(pool) => break pool,
                Err(e) if retries > 0 => {
                    retries -= 1;
                    tracing::warn!(
                        "Database connection failed, retrying in {:?} ({} retries left): {}",
                        delay,
                        retries,
                        e
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(e) => {
                    tracing::error!("Failed to connect to database after retries: {}", e);
                    return Err(Box::new(e));
                }
            }
        };

        info!(
            "Database pool configured: max={}, min={}, acquire_timeout={}s, idle_timeout={}s, max_lifetime={}s",
            self.config.db_max_connections,
            self.config.db_min_connections,
            self.config.db_acquire_timeout_secs,
            self.config.db_idle_timeout_secs,
            self.config.db_max_lifetime_secs
        );

        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to run migrations: {}", e);
                e
            })?;

        self.pool = Some(pool);
        Ok(self)
    }

    /// Initialize the repositories for the configured backend
    pub fn with_repositories(mut self) -> Result<Self, Box<dyn std::error::Error>> {
        let (category_repo, product_repo): (
            Arc<dyn CategoryRepository>,
            Arc<dyn ProductRepository>,
        ) = match self.config.storage_backend {
            StorageBackend::Postgres => {
                let pool = self.pool.as_ref().ok_or("Database pool not initialized")?;
                (
                    Arc::new(PostgresCategoryRepository::new(pool.clone())),
                    Arc::new(PostgresProductRepository::new(pool.clone())),
                )
            }
            StorageBackend::Memory => (
                Arc::new(InMemoryCategoryRepository::seeded()?),
                Arc::new(InMemoryProductRepository::seeded()?),
            ),
        };

        self.category_repo = Some(category_repo);
        self.product_repo = Some(product_repo);

        info!(backend = %self.config.storage_backend, "Repositories initialized");
        Ok(self)
    }

    /// Build application state with all use cases
    pub fn build(self) -> Result<AppState, Box<dyn std::error::Error>> {
        let category_repo = self
            .category_repo
            .ok_or("Category repository not initialized")?;
        let product_repo = self
            .product_repo
            .ok_or("Product repository not initialized")?;

        let state = build_state(
            category_repo,
            product_repo,
            self.pool.map(Arc::new),
            &self.config,
        );

        info!("Application layer initialized");
        Ok(state)
    }

    /// Get configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Wire every use case over the given repositories
pub fn build_state(
    category_repo: Arc<dyn CategoryRepository>,
    product_repo: Arc<dyn ProductRepository>,
    pool: Option<Arc<sqlx::PgPool>>,
    config: &Config,
) -> AppState {
    let max_limit = config.max_list_limit;

    AppState {
        pool,
        allowed_origins: config.allowed_origins.clone(),
        list_categories_use_case: Arc::new(ListCategoriesUseCase::new(
            Arc::clone(&category_repo),
            max_limit,
        )),
        get_category_use_case: Arc::new(GetCategoryUseCase::new(Arc::clone(&category_repo))),
        create_category_use_case: Arc::new(CreateCategoryUseCase::new(Arc::clone(&category_repo))),
        update_category_use_case: Arc::new(UpdateCategoryUseCase::new(Arc::clone(&category_repo))),
        delete_category_use_case: Arc::new(DeleteCategoryUseCase::new(category_repo)),
        list_products_use_case: Arc::new(ListProductsUseCase::new(
            Arc::clone(&product_repo),
            max_limit,
        )),
        get_product_use_case: Arc::new(GetProductUseCase::new(Arc::clone(&product_repo))),
        create_product_use_case: Arc::new(CreateProductUseCase::new(Arc::clone(&product_repo))),
        update_product_use_case: Arc::new(UpdateProductUseCase::new(Arc::clone(&product_repo))),
        delete_product_use_case: Arc::new(DeleteProductUseCase::new(product_repo)),
    }
}
