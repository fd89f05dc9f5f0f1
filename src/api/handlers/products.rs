use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;

use crate::api::errors::ApiError;
use crate::api::middleware::validation::validate_and_respond;
use crate::application::dto::{
    DeletedResponse, ListProductsRequest, ProductDto, ProductListResponse, ProductRequest,
};
use crate::application::use_cases::{
    CreateProductUseCase, DeleteProductUseCase, GetProductUseCase, ListProductsUseCase,
    UpdateProductUseCase,
};

/// GET /products
/// List products filtered by title and/or category
#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    params(
        ("title" = Option<String>, Query, description = "Case-insensitive substring of the title"),
        ("category_id" = Option<i64>, Query, description = "Only products of this category"),
        ("limit" = Option<String>, Query, description = "Maximum number of rows"),
        ("sort" = Option<String>, Query, description = "`id`, `title`, `price` or `category_id`, optionally followed by ASC or DESC")
    ),
    responses(
        (status = 200, description = "Products retrieved successfully", body = ProductListResponse),
        (status = 400, description = "Invalid filter, limit or sort"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_products_handler(
    State(use_case): State<Arc<ListProductsUseCase>>,
    query: Result<Query<ListProductsRequest>, QueryRejection>,
) -> Result<Json<ProductListResponse>, ApiError> {
    let Query(query) = query?;
    let response = use_case.execute(query).await?;
    Ok(Json(response))
}

/// GET /products/{id}
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product found", body = ProductDto),
        (status = 400, description = "Invalid product ID"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product_handler(
    State(use_case): State<Arc<GetProductUseCase>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ProductDto>, ApiError> {
    let Path(id) = id?;
    let product = use_case.execute(id).await?;
    Ok(Json(product))
}

/// POST /products
#[utoipa::path(
    post,
    path = "/products",
    tag = "products",
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductDto),
        (status = 400, description = "Invalid product"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_product_handler(
    State(use_case): State<Arc<CreateProductUseCase>>,
    request: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductDto>), ApiError> {
    let Json(request) = request?;
    validate_and_respond(&request)?;

    let product = use_case.execute(request).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PATCH /products/{id}
#[utoipa::path(
    patch,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "Product ID")),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductDto),
        (status = 400, description = "Invalid product"),
        (status = 404, description = "Product not found"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn update_product_handler(
    State(use_case): State<Arc<UpdateProductUseCase>>,
    id: Result<Path<i64>, PathRejection>,
    request: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<Json<ProductDto>, ApiError> {
    let Path(id) = id?;
    let Json(request) = request?;
    validate_and_respond(&request)?;

    let product = use_case.execute(id, request).await?;
    Ok(Json(product))
}

/// DELETE /products/{id}
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted", body = DeletedResponse),
        (status = 400, description = "Invalid product ID"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete_product_handler(
    State(use_case): State<Arc<DeleteProductUseCase>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let Path(id) = id?;
    let response = use_case.execute(id).await?;
    Ok(Json(response))
}
