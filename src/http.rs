use crate::error::{CatalogError, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde_json::Value;

/// Port for fetching JSON documents, so the catalog can be exercised in
/// tests without a live server.
#[async_trait]
pub trait HttpPort: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<Value>;
}

/// Production adapter backed by reqwest.
pub struct ReqwestHttp {
    client: reqwest::Client,
}

impl ReqwestHttp {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for ReqwestHttp {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpPort for ReqwestHttp {
    async fn get_json(&self, url: &str) -> Result<Value> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let payload = response.bytes().await?;
        let value: Value = serde_json::from_slice(&payload)?;
        Ok(value)
    }
}
