//! # mock_commerce - Mock E-commerce Catalog Service
//!
//! A REST service exposing categories and products. Listings are read from
//! Postgres through a parameterized query assembler; writes are simulated.
//!
//! ## Architecture Layers
//!
//! - **Domain**: Core business types (entities, value objects, domain errors)
//! - **Application**: Use cases, ports (interfaces) and wiring
//! - **Infrastructure**: Query assembler and repository adapters
//! - **API**: HTTP handlers and middleware
//!
//! ## Query assembly
//!
//! ```
//! use mock_commerce::infrastructure::persistence::{QueryBuilder, QueryParam};
//!
//! let mut builder = QueryBuilder::new("SELECT id FROM products", &["id", "price"]);
//! builder.add_condition("category_id = ${}", 3_i64);
//! builder.set_sort_by("price DESC").unwrap();
//! builder.set_limit(10).unwrap();
//!
//! let (sql, params) = builder.build();
//! assert_eq!(
//!     sql,
//!     "SELECT id FROM products WHERE category_id = $1 ORDER BY price DESC LIMIT $2"
//! );
//! assert_eq!(params, vec![QueryParam::Integer(3), QueryParam::Integer(10)]);
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export key types explicitly to avoid ambiguity
pub use api::errors as api_errors;
pub use application::builder::ApplicationBuilder;
pub use application::{dto, ports, use_cases};
pub use config::Config;
pub use domain::errors as domain_errors;
pub use domain::{entities, value_objects};
