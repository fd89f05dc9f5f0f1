use axum::{
    middleware as axum_middleware,
    routing::{delete, get, patch, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;

use crate::api::handlers::{
    create_category_handler, create_product_handler, delete_category_handler,
    delete_product_handler, get_category_handler, get_product_handler, health_handler,
    list_categories_handler, list_products_handler, readiness_handler, update_category_handler,
    update_product_handler,
};
use crate::api::middleware::{cors, metrics};
use crate::api::openapi::swagger_ui;
use crate::application::use_cases::{
    CreateCategoryUseCase, CreateProductUseCase, DeleteCategoryUseCase, DeleteProductUseCase,
    GetCategoryUseCase, GetProductUseCase, ListCategoriesUseCase, ListProductsUseCase,
    UpdateCategoryUseCase, UpdateProductUseCase,
};

/// Application state container
pub struct AppState {
    /// `None` when running on the in-memory store
    pub pool: Option<Arc<PgPool>>,
    pub allowed_origins: Option<String>,
    pub list_categories_use_case: Arc<ListCategoriesUseCase>,
    pub get_category_use_case: Arc<GetCategoryUseCase>,
    pub create_category_use_case: Arc<CreateCategoryUseCase>,
    pub update_category_use_case: Arc<UpdateCategoryUseCase>,
    pub delete_category_use_case: Arc<DeleteCategoryUseCase>,
    pub list_products_use_case: Arc<ListProductsUseCase>,
    pub get_product_use_case: Arc<GetProductUseCase>,
    pub create_product_use_case: Arc<CreateProductUseCase>,
    pub update_product_use_case: Arc<UpdateProductUseCase>,
    pub delete_product_use_case: Arc<DeleteProductUseCase>,
}

/// Create router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/health/ready",
            get(readiness_handler).with_state(state.pool.clone()),
        )
        // Categories
        .route(
            "/categories",
            get(list_categories_handler).with_state(state.list_categories_use_case),
        )
        .route(
            "/categories",
            post(create_category_handler).with_state(state.create_category_use_case),
        )
        .route(
            "/categories/{id}",
            get(get_category_handler).with_state(state.get_category_use_case),
        )
        .route(
            "/categories/{id}",
            patch(update_category_handler).with_state(state.update_category_use_case),
        )
        .route(
            "/categories/{id}",
            delete(delete_category_handler).with_state(state.delete_category_use_case),
        )
        // Products
        .route(
            "/products",
            get(list_products_handler).with_state(state.list_products_use_case),
        )
        .route(
            "/products",
            post(create_product_handler).with_state(state.create_product_use_case),
        )
        .route(
            "/products/{id}",
            get(get_product_handler).with_state(state.get_product_use_case),
        )
        .route(
            "/products/{id}",
            patch(update_product_handler).with_state(state.update_product_use_case),
        )
        .route(
            "/products/{id}",
            delete(delete_product_handler).with_state(state.delete_product_use_case),
        )
        .merge(swagger_ui())
        .layer(axum_middleware::from_fn(metrics::metrics_middleware))
        .layer(cors::create_cors_layer(state.allowed_origins.as_deref()))
}
