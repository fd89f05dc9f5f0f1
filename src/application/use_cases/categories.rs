use std::sync::Arc;

use crate::application::dto::{
    CategoryDto, CategoryFilter, CategoryListResponse, CategoryRequest, DeletedResponse,
    ListCategoriesRequest,
};
use crate::application::errors::CatalogUseCaseError;
use crate::application::ports::{CategoryRepository, RepositoryError};
use crate::application::validation::{normalize_filter, parse_limit, validate_id};
use crate::domain::entities::NewCategory;
use crate::domain::value_objects::Title;

fn into_new_category(request: CategoryRequest) -> Result<NewCategory, CatalogUseCaseError> {
    Ok(NewCategory {
        title: Title::new(request.title)?,
        description: request.description,
        image: request.image,
    })
}

/// Use case: List categories with optional title filter, sort and limit
pub struct ListCategoriesUseCase {
    category_repo: Arc<dyn CategoryRepository>,
    max_limit: i64,
}

impl ListCategoriesUseCase {
    pub fn new(category_repo: Arc<dyn CategoryRepository>, max_limit: i64) -> Self {
        Self {
            category_repo,
            max_limit,
        }
    }

    pub async fn execute(
        &self,
        request: ListCategoriesRequest,
    ) -> Result<CategoryListResponse, CatalogUseCaseError> {
        // 1. Parse and validate
        let filter = CategoryFilter {
            title: normalize_filter(request.title),
            limit: parse_limit(request.limit.as_deref(), self.max_limit)?,
            sort_by: normalize_filter(request.sort),
        };

        // 2. Query repository
        let categories = self.category_repo.find_all(&filter).await?;

        // 3. Convert to DTOs
        let categories: Vec<CategoryDto> =
            categories.into_iter().map(CategoryDto::from).collect();
        let total = categories.len();

        Ok(CategoryListResponse { categories, total })
    }
}

/// Use case: Fetch one category
pub struct GetCategoryUseCase {
    category_repo: Arc<dyn CategoryRepository>,
}

impl GetCategoryUseCase {
    pub fn new(category_repo: Arc<dyn CategoryRepository>) -> Self {
        Self { category_repo }
    }

    pub async fn execute(&self, id: i64) -> Result<CategoryDto, CatalogUseCaseError> {
        let id = validate_id(id)?;

        match self.category_repo.find_by_id(id).await {
            Ok(Some(category)) => Ok(category.into()),
            Ok(None) => Err(CatalogUseCaseError::NotFound(format!("category {}", id))),
            Err(RepositoryError::SerializationError(e)) => {
                tracing::error!(%e, "Repository serialization error while loading category {}", id);
                Err(CatalogUseCaseError::NotFound(format!("category {}", id)))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Use case: Create a category
pub struct CreateCategoryUseCase {
    category_repo: Arc<dyn CategoryRepository>,
}

impl CreateCategoryUseCase {
    pub fn new(category_repo: Arc<dyn CategoryRepository>) -> Self {
        Self { category_repo }
    }

    pub async fn execute(
        &self,
        request: CategoryRequest,
    ) -> Result<CategoryDto, CatalogUseCaseError> {
        let new_category = into_new_category(request)?;
        let category = self.category_repo.create(&new_category).await?;

        tracing::info!(category_id = category.id(), "Category created");
        Ok(category.into())
    }
}

/// Use case: Update a category
pub struct UpdateCategoryUseCase {
    category_repo: Arc<dyn CategoryRepository>,
}

impl UpdateCategoryUseCase {
    pub fn new(category_repo: Arc<dyn CategoryRepository>) -> Self {
        Self { category_repo }
    }

    pub async fn execute(
        &self,
        id: i64,
        request: CategoryRequest,
    ) -> Result<CategoryDto, CatalogUseCaseError> {
        let id = validate_id(id)?;
        let new_category = into_new_category(request)?;

        let category = match self.category_repo.update(id, &new_category).await {
            Ok(category) => category,
            Err(RepositoryError::NotFound(_)) => {
                return Err(CatalogUseCaseError::NotFound(format!("category {}", id)))
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(category_id = id, "Category updated");
        Ok(category.into())
    }
}

/// Use case: Delete a category
pub struct DeleteCategoryUseCase {
    category_repo: Arc<dyn CategoryRepository>,
}

impl DeleteCategoryUseCase {
    pub fn new(category_repo: Arc<dyn CategoryRepository>) -> Self {
        Self { category_repo }
    }

    pub async fn execute(&self, id: i64) -> Result<DeletedResponse, CatalogUseCaseError> {
        let id = validate_id(id)?;

        let id = match self.category_repo.delete(id).await {
            Ok(id) => id,
            Err(RepositoryError::NotFound(_)) => {
                return Err(CatalogUseCaseError::NotFound(format!("category {}", id)))
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(category_id = id, "Category deleted");
        Ok(DeletedResponse { id })
    }
}
