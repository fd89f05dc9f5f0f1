use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Title;

/// Product category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    id: i64,
    title: Title,
    description: Option<String>,
    image: Option<String>,
}

impl Category {
    pub fn new(
        id: i64,
        title: Title,
        description: Option<String>,
        image: Option<String>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            image,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }
}

/// Category fields before an id is assigned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCategory {
    pub title: Title,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl NewCategory {
    pub fn into_category(self, id: i64) -> Category {
        Category::new(id, self.title, self.description, self.image)
    }
}
