use async_trait::async_trait;

use crate::stock::StockRow;
use crate::CoreResult;

/// Source of ticker rows for the stocks page.
#[async_trait]
pub trait StockRepository: Send + Sync {
    async fn list_stocks(&self) -> CoreResult<Vec<StockRow>>;
}

/// Destination for domain events (contact submissions, newsletter signups).
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, topic: &str, key: &str, payload: &serde_json::Value) -> CoreResult<()>;
}
