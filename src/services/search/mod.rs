pub mod elastic;

use async_trait::async_trait;

use crate::models::IndexHit;

#[async_trait]
pub trait BusinessIndex: Send + Sync {
    /// Returns index entries whose cuisine matches the query, unordered.
    async fn search_cuisine(&self, cuisine: &str) -> anyhow::Result<Vec<IndexHit>>;
}
