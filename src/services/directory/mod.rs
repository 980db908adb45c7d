pub mod rest;

use async_trait::async_trait;

use crate::models::BusinessRecord;

#[async_trait]
pub trait BusinessDirectory: Send + Sync {
    /// Resolves a business id to its display record. `Ok(None)` is a miss.
    async fn get_business(&self, business_id: &str) -> anyhow::Result<Option<BusinessRecord>>;
}
