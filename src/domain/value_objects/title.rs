use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Display title of a catalog item, trimmed and non-empty
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Title(String);

impl Title {
    const MAX_LENGTH: usize = 255;

    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(DomainError::EmptyTitle);
        }

        let len = trimmed.chars().count();
        if len > Self::MAX_LENGTH {
            return Err(DomainError::TitleTooLong {
                len,
                max: Self::MAX_LENGTH,
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Title {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Title> for String {
    fn from(title: Title) -> Self {
        title.0
    }
}

impl std::fmt::Display for Title {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_is_trimmed() {
        let title = Title::new("  Electronics ").unwrap();
        assert_eq!(title.as_str(), "Electronics");
    }

    #[test]
    fn test_blank_title_rejected() {
        assert_eq!(Title::new("   ").unwrap_err(), DomainError::EmptyTitle);
    }

    #[test]
    fn test_long_title_rejected() {
        let err = Title::new("x".repeat(256)).unwrap_err();
        assert!(matches!(err, DomainError::TitleTooLong { len: 256, .. }));
    }
}
