use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error("unknown whisky sub-filter: {0}")]
    UnknownSubFilter(String),
    #[error("invalid price: {0}")]
    InvalidPrice(String),
}
