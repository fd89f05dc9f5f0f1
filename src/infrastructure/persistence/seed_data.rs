//! Catalog fixtures shared by the in-memory repositories.
//!
//! Mirrors the rows inserted by the initial migration.

use crate::domain::entities::{Category, Product};
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{Price, Title};

const CATEGORIES: &[(i64, &str, &str)] = &[
    (1, "Electronics", "Gadgets, audio and accessories"),
    (2, "Books", "Printed and digital reading"),
    (3, "Clothing", "Everyday apparel"),
    (4, "Home & Kitchen", "Cookware and home goods"),
    (5, "Sports & Outdoors", "Gear for staying active"),
    (6, "Toys & Games", "Fun for all ages"),
    (7, "Beauty", "Skin and hair care"),
    (8, "Grocery", "Pantry staples and snacks"),
    (9, "Automotive", "Car care and accessories"),
    (10, "Office Supplies", "Desk and stationery"),
];

const PRODUCTS: &[(i64, &str, f64, &str, i64)] = &[
    (1, "Wireless Headphones", 79.99, "Over-ear with noise cancelling", 1),
    (2, "Smartphone Stand", 15.5, "Adjustable aluminium stand", 1),
    (3, "The Rust Programming Language", 39.95, "The official book", 2),
    (4, "Sci-Fi Anthology", 12.99, "Twelve short stories", 2),
    (5, "Cotton T-Shirt", 9.99, "Crew neck, unisex", 3),
    (6, "Denim Jacket", 54.0, "Classic fit", 3),
    (7, "Chef's Knife", 45.0, "20cm stainless steel blade", 4),
    (8, "Ceramic Mug Set", 22.5, "Set of four", 4),
    (9, "Yoga Mat", 25.0, "6mm non-slip", 5),
    (10, "Camping Lantern", 18.75, "Rechargeable LED", 5),
    (11, "Building Blocks Set", 34.99, "500 pieces", 6),
    (12, "Strategy Board Game", 29.0, "2-4 players", 6),
    (13, "Face Moisturizer", 16.4, "Fragrance free", 7),
    (14, "Shampoo Bar", 8.25, "Plastic free packaging", 7),
    (15, "Organic Coffee Beans", 13.6, "Medium roast, 500g", 8),
    (16, "Dark Chocolate Bar", 3.5, "70% cocoa", 8),
    (17, "Car Phone Mount", 11.99, "Vent clip", 9),
    (18, "Tire Pressure Gauge", 7.49, "Digital readout", 9),
    (19, "Gel Pen Pack", 6.99, "Ten colours", 10),
    (20, "Desk Organizer", 19.9, "Bamboo, five compartments", 10),
];

fn image_url(title: &str) -> String {
    format!("https://placehold.co/600x400?text={}", title.replace(' ', "+"))
}

pub fn categories() -> Result<Vec<Category>, DomainError> {
    CATEGORIES
        .iter()
        .map(|&(id, title, description)| {
            Ok(Category::new(
                id,
                Title::new(title)?,
                Some(description.to_string()),
                Some(image_url(title)),
            ))
        })
        .collect()
}

pub fn products() -> Result<Vec<Product>, DomainError> {
    PRODUCTS
        .iter()
        .map(|&(id, title, price, description, category_id)| {
            Ok(Product::new(
                id,
                Title::new(title)?,
                Price::new(price)?,
                Some(description.to_string()),
                category_id,
                Some(image_url(title)),
            ))
        })
        .collect()
}
