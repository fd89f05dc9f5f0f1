pub mod categories;
pub mod health;
pub mod products;


pub use categories::{
    create_category_handler, delete_category_handler, get_category_handler,
    list_categories_handler, update_category_handler,
};
pub use health::{health_handler, readiness_handler};
pub use products::{
    create_product_handler, delete_product_handler, get_product_handler, list_products_handler,
    update_product_handler,
};
