use anyhow::Context;
use async_trait::async_trait;
use reqwest::StatusCode;

use super::BusinessDirectory;
use crate::models::BusinessRecord;

pub struct RestBusinessDirectory {
    url: String,
    token: String,
    client: reqwest::Client,
}

impl RestBusinessDirectory {
    pub fn new(url: String, token: String) -> Self {
        Self {
            url,
            token,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl BusinessDirectory for RestBusinessDirectory {
    async fn get_business(&self, business_id: &str) -> anyhow::Result<Option<BusinessRecord>> {
        let mut request = self
            .client
            .get(format!("{}/businesses/{}", self.url, business_id));

        if !self.token.is_empty() {
            request = request.bearer_auth(&self.token);
        }

        let resp = request
            .send()
            .await
            .context("failed to call business directory")?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let record: BusinessRecord = resp
            .error_for_status()
            .context("business directory returned error")?
            .json()
            .await
            .context("failed to parse business record")?;

        Ok(Some(record))
    }
}
