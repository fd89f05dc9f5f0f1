use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("Title cannot be empty")]
    EmptyTitle,

    #[error("Title too long: {len} > {max}")]
    TitleTooLong { len: usize, max: usize },

    #[error("Invalid price: {0}")]
    InvalidPrice(f64),

    #[error("Invalid identifier: {0}")]
    InvalidId(i64),
}
