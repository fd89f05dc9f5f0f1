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
    CategoryDto, CategoryListResponse, CategoryRequest, DeletedResponse, ListCategoriesRequest,
};
use crate::application::use_cases::{
    CreateCategoryUseCase, DeleteCategoryUseCase, GetCategoryUseCase, ListCategoriesUseCase,
    UpdateCategoryUseCase,
};

/// GET /categories
/// List categories, optionally filtered by title
#[utoipa::path(
    get,
    path = "/categories",
    tag = "categories",
    params(
        ("title" = Option<String>, Query, description = "Case-insensitive substring of the title"),
        ("limit" = Option<String>, Query, description = "Maximum number of rows"),
        ("sort" = Option<String>, Query, description = "`id` or `title`, optionally followed by ASC or DESC")
    ),
    responses(
        (status = 200, description = "Categories retrieved successfully", body = CategoryListResponse),
        (status = 400, description = "Invalid limit or sort"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_categories_handler(
    State(use_case): State<Arc<ListCategoriesUseCase>>,
    query: Result<Query<ListCategoriesRequest>, QueryRejection>,
) -> Result<Json<CategoryListResponse>, ApiError> {
    let Query(query) = query?;
    let response = use_case.execute(query).await?;
    Ok(Json(response))
}

/// GET /categories/{id}
#[utoipa::path(
    get,
    path = "/categories/{id}",
    tag = "categories",
    params(("id" = i64, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category found", body = CategoryDto),
        (status = 400, description = "Invalid category ID"),
        (status = 404, description = "Category not found")
    )
)]
pub async fn get_category_handler(
    State(use_case): State<Arc<GetCategoryUseCase>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<CategoryDto>, ApiError> {
    let Path(id) = id?;
    let category = use_case.execute(id).await?;
    Ok(Json(category))
}

/// POST /categories
#[utoipa::path(
    post,
    path = "/categories",
    tag = "categories",
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryDto),
        (status = 400, description = "Invalid category"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_category_handler(
    State(use_case): State<Arc<CreateCategoryUseCase>>,
    request: Result<Json<CategoryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CategoryDto>), ApiError> {
    let Json(request) = request?;
    validate_and_respond(&request)?;

    let category = use_case.execute(request).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// PATCH /categories/{id}
#[utoipa::path(
    patch,
    path = "/categories/{id}",
    tag = "categories",
    params(("id" = i64, Path, description = "Category ID")),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = CategoryDto),
        (status = 400, description = "Invalid category"),
        (status = 404, description = "Category not found"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn update_category_handler(
    State(use_case): State<Arc<UpdateCategoryUseCase>>,
    id: Result<Path<i64>, PathRejection>,
    request: Result<Json<CategoryRequest>, JsonRejection>,
) -> Result<Json<CategoryDto>, ApiError> {
    let Path(id) = id?;
    let Json(request) = request?;
    validate_and_respond(&request)?;

    let category = use_case.execute(id, request).await?;
    Ok(Json(category))
}

/// DELETE /categories/{id}
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    tag = "categories",
    params(("id" = i64, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted", body = DeletedResponse),
        (status = 400, description = "Invalid category ID"),
        (status = 404, description = "Category not found")
    )
)]
pub async fn delete_category_handler(
    State(use_case): State<Arc<DeleteCategoryUseCase>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let Path(id) = id?;
    let response = use_case.execute(id).await?;
    Ok(Json(response))
}
