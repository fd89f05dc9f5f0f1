use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::entities::{Category, Product};

/// DTO for category responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryDto {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.id(),
            title: category.title().to_string(),
            description: category.description().map(|d| d.to_string()),
            image: category.image().map(|i| i.to_string()),
        }
    }
}

/// DTO for product responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductDto {
    pub id: i64,
    pub title: String,
    pub price: f64,
    pub description: Option<String>,
    pub category_id: i64,
    pub image: Option<String>,
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        Self {
            id: product.id(),
            title: product.title().to_string(),
            price: product.price().value(),
            description: product.description().map(|d| d.to_string()),
            category_id: product.category_id(),
            image: product.image().map(|i| i.to_string()),
        }
    }
}

/// Body for creating or updating a category
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CategoryRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,
    #[validate(length(max = 2000, message = "Description cannot exceed 2000 characters"))]
    pub description: Option<String>,
    #[validate(length(max = 2048, message = "Image URL cannot exceed 2048 characters"))]
    pub image: Option<String>,
}

/// Body for creating or updating a product
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: f64,
    #[validate(length(max = 2000, message = "Description cannot exceed 2000 characters"))]
    pub description: Option<String>,
    #[validate(range(min = 1, message = "Category id must be positive"))]
    pub category_id: i64,
    #[validate(length(max = 2048, message = "Image URL cannot exceed 2048 characters"))]
    pub image: Option<String>,
}

/// Raw list parameters as received from the client
///
/// `limit` stays textual so a malformed value surfaces as an explicit
/// conversion error from the use case.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ListCategoriesRequest {
    pub title: Option<String>,
    pub limit: Option<String>,
    pub sort: Option<String>,
}

/// Raw product list parameters as received from the client
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ListProductsRequest {
    pub title: Option<String>,
    pub category_id: Option<i64>,
    pub limit: Option<String>,
    pub sort: Option<String>,
}

/// Validated category filters handed to the repository
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryFilter {
    pub title: Option<String>,
    pub limit: Option<i64>,
    pub sort_by: Option<String>,
}

/// Validated product filters handed to the repository
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub title: Option<String>,
    pub category_id: Option<i64>,
    pub limit: Option<i64>,
    pub sort_by: Option<String>,
}

/// DTO for category list response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryListResponse {
    pub categories: Vec<CategoryDto>,
    pub total: usize,
}

/// DTO for product list response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductListResponse {
    pub products: Vec<ProductDto>,
    pub total: usize,
}

/// DTO for delete response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DeletedResponse {
    pub id: i64,
}
