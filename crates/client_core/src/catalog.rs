//! Category selection, whisky sub-filtering and the product fetch lifecycle.
//!
//! While a fetch is outstanding the previously fetched products stay visible;
//! [`CatalogController::is_loading`] reports the outstanding fetch. A failed
//! fetch leaves the products untouched and records the failure in
//! [`CatalogController::last_error`].

use std::sync::Arc;

use shared::domain::{Category, Product, ProductKey, SubFilter};
use tracing::{debug, info, warn};

use crate::{
    async_request::{AsyncRequest, Completion, RequestId},
    backend::CatalogSource,
    error::CatalogError,
};

/// Identifies one issued fetch. Only the most recent tag may update products.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTag {
    pub category: Category,
    pub request: RequestId,
}

pub type FetchCompletion = Completion<Category, Vec<Product>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchApplied {
    Updated { category: Category, count: usize },
    Failed { category: Category },
    /// Superseded by a later fetch; dropped without touching state.
    Stale { category: Category },
}

pub struct CatalogController {
    source: Arc<dyn CatalogSource>,
    requests: AsyncRequest<Category, Vec<Product>>,
    category: Category,
    sub_filter: SubFilter,
    products: Vec<Product>,
    pending: Option<FetchTag>,
    last_error: Option<CatalogError>,
}

impl CatalogController {
    /// Starts on the default category with no products and nothing in flight.
    /// Call [`select_category`](Self::select_category) to load the first grid.
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            requests: AsyncRequest::new(),
            category: Category::default(),
            sub_filter: SubFilter::All,
            products: Vec::new(),
            pending: None,
            last_error: None,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn sub_filter(&self) -> SubFilter {
        self.sub_filter
    }

    /// The full fetched set, in arrival order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn last_error(&self) -> Option<&CatalogError> {
        self.last_error.as_ref()
    }

    pub fn available_sub_filters(&self) -> &'static [SubFilter] {
        if self.category.has_sub_filters() {
            &SubFilter::ALL
        } else {
            &[]
        }
    }

    pub fn select_category(&mut self, category: Category) -> FetchTag {
        self.category = category;
        self.sub_filter = SubFilter::All;
        self.issue_fetch()
    }

    /// Re-fetches the current category, keeping the selected sub-filter.
    pub fn refresh(&mut self) -> FetchTag {
        self.issue_fetch()
    }

    pub fn select_sub_filter(&mut self, sub_filter: SubFilter) -> Result<(), CatalogError> {
        if !self.category.has_sub_filters() {
            return Err(CatalogError::SubFilterUnavailable {
                category: self.category,
            });
        }
        self.sub_filter = sub_filter;
        Ok(())
    }

    pub fn displayed_products(&self) -> Vec<&Product> {
        let sub_filter = self.effective_sub_filter();
        self.products
            .iter()
            .filter(|product| sub_filter.matches(product))
            .collect()
    }

    /// Displayed products paired with their render identity. Index fallbacks
    /// refer to positions within the displayed list.
    pub fn displayed_entries(&self) -> Vec<(ProductKey, &Product)> {
        self.displayed_products()
            .into_iter()
            .enumerate()
            .map(|(index, product)| (product.key(index), product))
            .collect()
    }

    pub fn apply_completion(&mut self, completion: FetchCompletion) -> FetchApplied {
        let tag = FetchTag {
            category: completion.tag,
            request: completion.id,
        };
        if self.pending != Some(tag) {
            debug!(
                category = %tag.category,
                request_id = tag.request.0,
                "catalog: discarding stale fetch result"
            );
            return FetchApplied::Stale {
                category: tag.category,
            };
        }
        self.pending = None;

        match completion.outcome {
            Ok(products) => {
                let count = products.len();
                info!(category = %tag.category, count, "catalog: products updated");
                self.products = products;
                self.last_error = None;
                FetchApplied::Updated {
                    category: tag.category,
                    count,
                }
            }
            Err(source) => {
                warn!(category = %tag.category, error = %source, "catalog: fetch failed; keeping previous products");
                self.last_error = Some(CatalogError::Fetch {
                    category: tag.category,
                    source,
                });
                FetchApplied::Failed {
                    category: tag.category,
                }
            }
        }
    }

    /// Waits for the next fetch to resolve and applies it. Cancel safe.
    pub async fn resolve_next(&mut self) -> FetchApplied {
        let completion = self.requests.next_completion().await;
        self.apply_completion(completion)
    }

    /// Applies every completion that has already arrived, without waiting.
    pub fn drain_ready(&mut self) -> Vec<FetchApplied> {
        let mut applied = Vec::new();
        while let Some(completion) = self.requests.try_completion() {
            applied.push(self.apply_completion(completion));
        }
        applied
    }

    fn effective_sub_filter(&self) -> SubFilter {
        if self.category.has_sub_filters() {
            self.sub_filter
        } else {
            SubFilter::All
        }
    }

    fn issue_fetch(&mut self) -> FetchTag {
        let category = self.category;
        let source = Arc::clone(&self.source);
        let request = self
            .requests
            .issue(category, async move { source.fetch_products(category).await });
        let tag = FetchTag { category, request };

        if let Some(previous) = self.pending.replace(tag) {
            debug!(
                superseded = previous.request.0,
                superseded_category = %previous.category,
                "catalog: fetch superseded"
            );
        }
        debug!(category = %category, request_id = request.0, "catalog: fetch issued");
        tag
    }
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
