//! Collaborator seams for the two external contracts.

use async_trait::async_trait;
use shared::domain::{Category, Product};

use crate::error::RequestError;

#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_products(&self, category: Category) -> Result<Vec<Product>, RequestError>;
}

#[async_trait]
pub trait AssistantBackend: Send + Sync {
    /// Returns the assistant's free-text answer to `query`.
    async fn ask(&self, query: &str) -> Result<String, RequestError>;
}
