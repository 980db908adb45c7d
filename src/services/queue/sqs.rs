use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::{QueueMessage, ReservationQueue};

/// Client for an SQS-compatible queue speaking the JSON wire protocol
/// (ElasticMQ in local setups).
pub struct SqsQueue {
    queue_url: String,
    client: reqwest::Client,
}

impl SqsQueue {
    pub fn new(queue_url: String) -> Self {
        Self {
            queue_url,
            client: reqwest::Client::new(),
        }
    }

    async fn call(
        &self,
        action: &str,
        body: serde_json::Value,
    ) -> anyhow::Result<reqwest::Response> {
        self.client
            .post(&self.queue_url)
            .header("X-Amz-Target", format!("AmazonSQS.{action}"))
            .header("Content-Type", "application/x-amz-json-1.0")
            .body(body.to_string())
            .send()
            .await
            .with_context(|| format!("failed to call queue {action}"))?
            .error_for_status()
            .with_context(|| format!("queue {action} returned error"))
    }
}

#[derive(Debug, Deserialize)]
struct ReceivedMessage {
    #[serde(rename = "ReceiptHandle")]
    receipt_handle: String,
    #[serde(rename = "Body")]
    body: String,
}

#[derive(Debug, Default, Deserialize)]
struct ReceiveResponse {
    #[serde(rename = "Messages", default)]
    messages: Vec<ReceivedMessage>,
}

#[async_trait]
impl ReservationQueue for SqsQueue {
    async fn send(&self, body: &str) -> anyhow::Result<()> {
        self.call(
            "SendMessage",
            json!({ "QueueUrl": self.queue_url, "MessageBody": body }),
        )
        .await?;
        Ok(())
    }

    async fn receive(&self, max_messages: u32) -> anyhow::Result<Vec<QueueMessage>> {
        let resp = self
            .call(
                "ReceiveMessage",
                json!({ "QueueUrl": self.queue_url, "MaxNumberOfMessages": max_messages }),
            )
            .await?;

        let parsed: ReceiveResponse = resp
            .json()
            .await
            .context("failed to parse ReceiveMessage response")?;

        Ok(parsed
            .messages
            .into_iter()
            .map(|m| QueueMessage {
                receipt_handle: m.receipt_handle,
                body: m.body,
            })
            .collect())
    }

    async fn delete(&self, receipt_handle: &str) -> anyhow::Result<()> {
        self.call(
            "DeleteMessage",
            json!({ "QueueUrl": self.queue_url, "ReceiptHandle": receipt_handle }),
        )
        .await?;
        Ok(())
    }
}
