use std::sync::Arc;

use crate::application::dto::{
    DeletedResponse, ListProductsRequest, ProductDto, ProductFilter, ProductListResponse,
    ProductRequest,
};
use crate::application::errors::CatalogUseCaseError;
use crate::application::ports::{ProductRepository, RepositoryError};
use crate::application::validation::{normalize_filter, parse_limit, validate_id};
use crate::domain::entities::NewProduct;
use crate::domain::value_objects::{Price, Title};

fn into_new_product(request: ProductRequest) -> Result<NewProduct, CatalogUseCaseError> {
    Ok(NewProduct {
        title: Title::new(request.title)?,
        price: Price::new(request.price)?,
        description: request.description,
        category_id: validate_id(request.category_id)?,
        image: request.image,
    })
}

/// Use case: List products with optional title/category filters, sort and limit
pub struct ListProductsUseCase {
    product_repo: Arc<dyn ProductRepository>,
    max_limit: i64,
}

impl ListProductsUseCase {
    pub fn new(product_repo: Arc<dyn ProductRepository>, max_limit: i64) -> Self {
        Self {
            product_repo,
            max_limit,
        }
    }

    pub async fn execute(
        &self,
        request: ListProductsRequest,
    ) -> Result<ProductListResponse, CatalogUseCaseError> {
        // 1. Parse and validate
        let category_id = request.category_id.map(validate_id).transpose()?;
        let filter = ProductFilter {
            title: normalize_filter(request.title),
            category_id,
            limit: parse_limit(request.limit.as_deref(), self.max_limit)?,
            sort_by: normalize_filter(request.sort),
        };

        // 2. Query repository
        let products = self.product_repo.find_all(&filter).await?;

        // 3. Convert to DTOs
        let products: Vec<ProductDto> = products.into_iter().map(ProductDto::from).collect();
        let total = products.len();

        Ok(ProductListResponse { products, total })
    }
}

/// Use case: Fetch one product
pub struct GetProductUseCase {
    product_repo: Arc<dyn ProductRepository>,
}

impl GetProductUseCase {
    pub fn new(product_repo: Arc<dyn ProductRepository>) -> Self {
        Self { product_repo }
    }

    pub async fn execute(&self, id: i64) -> Result<ProductDto, CatalogUseCaseError> {
        let id = validate_id(id)?;

        match self.product_repo.find_by_id(id).await {
            Ok(Some(product)) => Ok(product.into()),
            Ok(None) => Err(CatalogUseCaseError::NotFound(format!("product {}", id))),
            Err(RepositoryError::SerializationError(e)) => {
                tracing::error!(%e, "Repository serialization error while loading product {}", id);
                Err(CatalogUseCaseError::NotFound(format!("product {}", id)))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Use case: Create a product
pub struct CreateProductUseCase {
    product_repo: Arc<dyn ProductRepository>,
}

impl CreateProductUseCase {
    pub fn new(product_repo: Arc<dyn ProductRepository>) -> Self {
        Self { product_repo }
    }

    pub async fn execute(&self, request: ProductRequest) -> Result<ProductDto, CatalogUseCaseError> {
        let new_product = into_new_product(request)?;
        let product = self.product_repo.create(&new_product).await?;

        tracing::info!(product_id = product.id(), "Product created");
        Ok(product.into())
    }
}

/// Use case: Update a product
pub struct UpdateProductUseCase {
    product_repo: Arc<dyn ProductRepository>,
}

impl UpdateProductUseCase {
    pub fn new(product_repo: Arc<dyn ProductRepository>) -> Self {
        Self { product_repo }
    }

    pub async fn execute(
        &self,
        id: i64,
        request: ProductRequest,
    ) -> Result<ProductDto, CatalogUseCaseError> {
        let id = validate_id(id)?;
        let new_product = into_new_product(request)?;

        let product = match self.product_repo.update(id, &new_product).await {
            Ok(product) => product,
            Err(RepositoryError::NotFound(_)) => {
                return Err(CatalogUseCaseError::NotFound(format!("product {}", id)))
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(product_id = id, "Product updated");
        Ok(product.into())
    }
}

/// Use case: Delete a product
pub struct DeleteProductUseCase {
    product_repo: Arc<dyn ProductRepository>,
}

impl DeleteProductUseCase {
    pub fn new(product_repo: Arc<dyn ProductRepository>) -> Self {
        Self { product_repo }
    }

    pub async fn execute(&self, id: i64) -> Result<DeletedResponse, CatalogUseCaseError> {
        let id = validate_id(id)?;

        let id = match self.product_repo.delete(id).await {
            Ok(id) => id,
            Err(RepositoryError::NotFound(_)) => {
                return Err(CatalogUseCaseError::NotFound(format!("product {}", id)))
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(product_id = id, "Product deleted");
        Ok(DeletedResponse { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockProductRepository;
    use crate::domain::entities::Product;
    use crate::domain::errors::DomainError;

    fn create_test_product(id: i64) -> Product {
        Product::new(
            id,
            Title::new("Running Shoes").unwrap(),
            Price::new(59.99).unwrap(),
            None,
            3,
            None,
        )
    }

    fn product_request(price: f64, category_id: i64) -> ProductRequest {
        ProductRequest {
            title: "Running Shoes".to_string(),
            price,
            description: None,
            category_id,
            image: None,
        }
    }

    #[tokio::test]
    async fn test_list_products_happy_path() {
        // Arrange
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_all()
            .withf(|filter| {
                *filter
                    == ProductFilter {
                        title: Some("shoe".to_string()),
                        category_id: Some(3),
                        limit: Some(5),
                        sort_by: Some("price DESC".to_string()),
                    }
            })
            .times(1)
            .returning(|_| Ok(vec![create_test_product(1), create_test_product(2)]));

        let use_case = ListProductsUseCase::new(Arc::new(mock_repo), 100);
        let request = ListProductsRequest {
            title: Some("shoe".to_string()),
            category_id: Some(3),
            limit: Some("5".to_string()),
            sort: Some("price DESC".to_string()),
        };

        // Act
        let response = use_case.execute(request).await.unwrap();

        // Assert
        assert_eq!(response.total, 2);
        assert_eq!(response.products[1].id, 2);
    }

    #[tokio::test]
    async fn test_list_products_rejects_bad_category() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_find_all().times(0);

        let use_case = ListProductsUseCase::new(Arc::new(mock_repo), 100);
        let err = use_case
            .execute(ListProductsRequest {
                category_id: Some(-3),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CatalogUseCaseError::Domain(DomainError::InvalidId(-3))
        ));
    }

    #[tokio::test]
    async fn test_get_product_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let use_case = GetProductUseCase::new(Arc::new(mock_repo));
        let err = use_case.execute(77).await.unwrap_err();

        assert!(matches!(err, CatalogUseCaseError::NotFound(_)));
        assert!(err.to_string().contains("product 77"));
    }

    #[tokio::test]
    async fn test_get_product_serialization_error_maps_to_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_id()
            .times(1)
            .returning(|_| Err(RepositoryError::SerializationError("bad title".to_string())));

        let use_case = GetProductUseCase::new(Arc::new(mock_repo));
        let err = use_case.execute(5).await.unwrap_err();

        assert!(matches!(err, CatalogUseCaseError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_create_product() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_create()
            .times(1)
            .returning(|p| Ok(p.clone().into_product(21)));

        let use_case = CreateProductUseCase::new(Arc::new(mock_repo));
        let dto = use_case.execute(product_request(12.5, 2)).await.unwrap();

        assert_eq!(dto.id, 21);
        assert_eq!(dto.price, 12.5);
        assert_eq!(dto.category_id, 2);
    }

    #[tokio::test]
    async fn test_create_product_negative_price() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_create().times(0);

        let use_case = CreateProductUseCase::new(Arc::new(mock_repo));
        let err = use_case.execute(product_request(-1.0, 2)).await.unwrap_err();

        assert!(matches!(
            err,
            CatalogUseCaseError::Domain(DomainError::InvalidPrice(_))
        ));
    }

    #[tokio::test]
    async fn test_update_product_echoes_id() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_update()
            .times(1)
            .returning(|id, p| Ok(p.clone().into_product(id)));

        let use_case = UpdateProductUseCase::new(Arc::new(mock_repo));
        let dto = use_case.execute(8, product_request(10.0, 1)).await.unwrap();

        assert_eq!(dto.id, 8);
    }

    #[tokio::test]
    async fn test_delete_product_missing() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_delete()
            .times(1)
            .returning(|id| Err(RepositoryError::NotFound(id.to_string())));

        let use_case = DeleteProductUseCase::new(Arc::new(mock_repo));
        let err = use_case.execute(99).await.unwrap_err();

        assert!(matches!(err, CatalogUseCaseError::NotFound(_)));
    }
}
