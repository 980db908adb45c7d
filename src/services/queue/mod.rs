pub mod sqs;

use async_trait::async_trait;

/// A message pulled from the durable queue. The receipt handle must be
/// passed back to delete the message after processing.
#[derive(Debug, Clone)]
pub struct QueueMessage {
    pub receipt_handle: String,
    pub body: String,
}

#[async_trait]
pub trait ReservationQueue: Send + Sync {
    async fn send(&self, body: &str) -> anyhow::Result<()>;
    async fn receive(&self, max_messages: u32) -> anyhow::Result<Vec<QueueMessage>>;
    async fn delete(&self, receipt_handle: &str) -> anyhow::Result<()>;
}
