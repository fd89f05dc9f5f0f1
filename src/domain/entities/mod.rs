mod category;
mod product;

pub use category::{Category, NewCategory};
pub use product::{NewProduct, Product};
