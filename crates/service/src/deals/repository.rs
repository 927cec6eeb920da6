use async_trait::async_trait;

use crate::deals::{Deal, DealFilter, DealInput};
use crate::errors::ServiceError;

/// Trait abstraction for deal storage, injected into the HTTP layer.
///
/// Callers check `exists` before `get_by_id`, `update_by_id` and
/// `delete_by_id`; only `update_by_id` reports a missing id itself.
#[async_trait]
pub trait DealStore: Send + Sync {
    async fn exists(&self, id: u64) -> bool;
    /// All deals matching `filter`, in insertion order.
    async fn list(&self, filter: &DealFilter) -> Vec<Deal>;
    /// Zero or one deals.
    async fn get_by_id(&self, id: u64) -> Vec<Deal>;
    async fn create(&self, input: DealInput) -> Deal {
        self.create_counted(input).await.0
    }
    /// Appends a new deal and returns it with the number of deals stored
    /// right after the insert.
    async fn create_counted(&self, input: DealInput) -> (Deal, usize);
    async fn update_by_id(&self, id: u64, input: DealInput) -> Result<Deal, ServiceError>;
    /// Removes the deal and returns what remains.
    async fn delete_by_id(&self, id: u64) -> Vec<Deal>;
    async fn count(&self) -> usize;
}
