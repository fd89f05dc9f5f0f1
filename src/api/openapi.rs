use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers::health::{HealthResponse, ReadinessResponse};
use crate::application::dto::{
    CategoryDto, CategoryListResponse, CategoryRequest, DeletedResponse, ProductDto,
    ProductListResponse, ProductRequest,
};

/// OpenAPI specification for the catalog API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mock Commerce API",
        version = "1.0.0",
        description = "Categories and products with filterable, sortable listings"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        crate::api::handlers::health::health_handler,
        crate::api::handlers::health::readiness_handler,
        crate::api::handlers::categories::list_categories_handler,
        crate::api::handlers::categories::get_category_handler,
        crate::api::handlers::categories::create_category_handler,
        crate::api::handlers::categories::update_category_handler,
        crate::api::handlers::categories::delete_category_handler,
        crate::api::handlers::products::list_products_handler,
        crate::api::handlers::products::get_product_handler,
        crate::api::handlers::products::create_product_handler,
        crate::api::handlers::products::update_product_handler,
        crate::api::handlers::products::delete_product_handler,
    ),
    components(
        schemas(
            CategoryDto,
            CategoryRequest,
            CategoryListResponse,
            ProductDto,
            ProductRequest,
            ProductListResponse,
            DeletedResponse,
            HealthResponse,
            ReadinessResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "categories", description = "Category catalog"),
        (name = "products", description = "Product catalog")
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI route
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
