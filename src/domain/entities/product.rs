use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Price, Title};

/// Catalog product, always attached to one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: i64,
    title: Title,
    price: Price,
    description: Option<String>,
    category_id: i64,
    image: Option<String>,
}

impl Product {
    pub fn new(
        id: i64,
        title: Title,
        price: Price,
        description: Option<String>,
        category_id: i64,
        image: Option<String>,
    ) -> Self {
        Self {
            id,
            title,
            price,
            description,
            category_id,
            image,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn category_id(&self) -> i64 {
        self.category_id
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }
}

/// Product fields before an id is assigned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub title: Title,
    pub price: Price,
    pub description: Option<String>,
    pub category_id: i64,
    pub image: Option<String>,
}

impl NewProduct {
    pub fn into_product(self, id: i64) -> Product {
        Product::new(
            id,
            self.title,
            self.price,
            self.description,
            self.category_id,
            self.image,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_accessors() {
        let product = Product::new(
            3,
            Title::new("Mechanical Keyboard").unwrap(),
            Price::new(89.5).unwrap(),
            None,
            2,
            Some("https://img.example/kb.png".to_string()),
        );

        assert_eq!(product.id(), 3);
        assert_eq!(product.title().as_str(), "Mechanical Keyboard");
        assert_eq!(product.price().value(), 89.5);
        assert_eq!(product.description(), None);
        assert_eq!(product.category_id(), 2);
        assert_eq!(product.image(), Some("https://img.example/kb.png"));
    }

    #[test]
    fn test_new_product_takes_assigned_id() {
        let draft = NewProduct {
            title: Title::new("Desk Lamp").unwrap(),
            price: Price::new(24.0).unwrap(),
            description: Some("LED".to_string()),
            category_id: 4,
            image: None,
        };

        let product = draft.into_product(21);
        assert_eq!(product.id(), 21);
        assert_eq!(product.title().as_str(), "Desk Lamp");
        assert_eq!(product.category_id(), 4);
    }
}
