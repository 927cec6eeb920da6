use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::deals::{seed::seed_deals, Deal, DealFilter, DealInput, DealStore};
use crate::errors::ServiceError;

/// Process-memory deal store. Insertion order is the list order.
///
/// Every mutation runs under one write guard, so id assignment and
/// in-place replacement cannot interleave across tasks.
#[derive(Clone, Default)]
pub struct InMemoryDealStore {
    inner: Arc<RwLock<Vec<Deal>>>,
}

impl InMemoryDealStore {
    /// Empty store; the first created deal gets id 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with the five sample deals.
    pub fn seeded() -> Self {
        Self::with_deals(seed_deals())
    }

    pub fn with_deals(deals: Vec<Deal>) -> Self {
        Self { inner: Arc::new(RwLock::new(deals)) }
    }

    fn next_id(deals: &[Deal]) -> u64 {
        deals.iter().map(|d| d.id).max().map_or(1, |max| max + 1)
    }
}

#[async_trait]
impl DealStore for InMemoryDealStore {
    async fn exists(&self, id: u64) -> bool {
        let deals = self.inner.read().await;
        deals.iter().any(|d| d.id == id)
    }

    async fn list(&self, filter: &DealFilter) -> Vec<Deal> {
        let deals = self.inner.read().await;
        if filter.is_empty() {
            return deals.clone();
        }
        deals.iter().filter(|d| filter.matches(d)).cloned().collect()
    }

    async fn get_by_id(&self, id: u64) -> Vec<Deal> {
        let deals = self.inner.read().await;
        deals.iter().filter(|d| d.id == id).cloned().collect()
    }

    async fn create_counted(&self, input: DealInput) -> (Deal, usize) {
        let mut deals = self.inner.write().await;
        let deal = Deal::from_input(Self::next_id(&deals), input);
        deals.push(deal.clone());
        let total = deals.len();
        debug!(id = deal.id, total, "deal appended");
        (deal, total)
    }

    async fn update_by_id(&self, id: u64, input: DealInput) -> Result<Deal, ServiceError> {
        let mut deals = self.inner.write().await;
        let slot = deals
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| ServiceError::not_found("deal", id))?;
        *slot = Deal::from_input(id, input);
        Ok(slot.clone())
    }

    async fn delete_by_id(&self, id: u64) -> Vec<Deal> {
        let mut deals = self.inner.write().await;
        let before = deals.len();
        deals.retain(|d| d.id != id);
        debug!(id, removed = before - deals.len(), "deal delete applied");
        deals.clone()
    }

    async fn count(&self) -> usize {
        self.inner.read().await.len()
    }
}
