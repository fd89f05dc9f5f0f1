mod in_memory_category_repository;
mod in_memory_product_repository;
mod postgres_category_repository;
mod postgres_product_repository;
mod query_builder;
mod seed_data;

pub use in_memory_category_repository::InMemoryCategoryRepository;
pub use in_memory_product_repository::InMemoryProductRepository;
pub use postgres_category_repository::{PostgresCategoryRepository, CATEGORY_SORT_COLUMNS};
pub use postgres_product_repository::{PostgresProductRepository, PRODUCT_SORT_COLUMNS};
pub use query_builder::{
    bind_params, contains_pattern, QueryBuilder, QueryBuilderError, QueryParam, SortClause,
    SortDirection, PLACEHOLDER_MARKER,
};
