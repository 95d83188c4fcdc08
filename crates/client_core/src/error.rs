use shared::domain::Category;
use thiserror::Error;

/// Failure of a single request to the backend. Controllers treat every variant
/// the same way; the split only matters for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("unexpected response status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RequestError::Malformed(err.to_string())
        } else if let Some(status) = err.status() {
            RequestError::Status(status.as_u16())
        } else {
            RequestError::Transport(err.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("failed to fetch {category} catalog: {source}")]
    Fetch {
        category: Category,
        source: RequestError,
    },
    #[error("sub-filters are only available for Whisky (selected: {category})")]
    SubFilterUnavailable { category: Category },
}
