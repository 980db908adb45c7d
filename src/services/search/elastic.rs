use anyhow::Context;
use async_trait::async_trait;
use serde_json::json;

use super::BusinessIndex;
use crate::models::IndexHit;

pub struct ElasticsearchIndex {
    url: String,
    index: String,
    client: reqwest::Client,
}

impl ElasticsearchIndex {
    pub fn new(url: String, index: String) -> Self {
        Self {
            url,
            index,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl BusinessIndex for ElasticsearchIndex {
    async fn search_cuisine(&self, cuisine: &str) -> anyhow::Result<Vec<IndexHit>> {
        let body = json!({
            "query": { "match": { "Cuisine": cuisine } },
        });

        let resp = self
            .client
            .post(format!("{}/{}/_search", self.url, self.index))
            .json(&body)
            .send()
            .await
            .context("failed to call search index")?
            .error_for_status()
            .context("search index returned error")?;

        let data: serde_json::Value = resp
            .json()
            .await
            .context("failed to parse search response")?;

        let hits = data["hits"]["hits"]
            .as_array()
            .cloned()
            .unwrap_or_default();

        Ok(hits
            .into_iter()
            .filter_map(|hit| {
                match serde_json::from_value::<IndexHit>(hit["_source"].clone()) {
                    Ok(parsed) => Some(parsed),
                    Err(e) => {
                        tracing::warn!(error = %e, "skipping malformed index entry");
                        None
                    }
                }
            })
            .collect())
    }
}
