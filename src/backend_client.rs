//! HTTP client for the venue backend (filtered variants + job requirements)

use crate::config::ServiceConfig;
use crate::error::{MatchError, Result};
use crate::sources::MenuSource;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error, info};

#[derive(Debug, Clone)]
pub struct BackendClient {
    config: ServiceConfig,
    client: reqwest::Client,
}

impl BackendClient {
    /// Create a new backend client with the configured request timeout
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .build()?;
        Ok(Self { config, client })
    }

    /// Check that the backend answers at all
    pub async fn ping(&self) -> Result<()> {
        self.client.get(&self.config.backend_base_url).send().await?;
        Ok(())
    }

    async fn read_json(endpoint: &str, response: reqwest::Response) -> Result<Value> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Backend {} failed: {} - {}", endpoint, status, body);
            return Err(MatchError::Upstream {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl MenuSource for BackendClient {
    fn name(&self) -> &'static str {
        "backend"
    }

    async fn fetch_variants(&self, filter: &Value) -> Result<Value> {
        let url = self.config.filtered_variants_url();
        match filter.get("maxPerson") {
            Some(max) => info!("Fetching filtered variants with maxPerson: {}", max),
            None => info!("Fetching filtered variants without maxPerson parameter"),
        }
        debug!("POST {} with filter {}", url, filter);

        let response = self.client.post(&url).json(filter).send().await?;
        let data = Self::read_json("filtered variants", response).await?;

        let variant_count = data
            .get("variants")
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0);
        debug!("Retrieved {} variants", variant_count);
        Ok(data)
    }

    async fn fetch_requirements(&self, job_id: &str) -> Result<Value> {
        let url = self.config.requirements_url(job_id);
        info!("Fetching user requirements for job ID: {}", job_id);

        let response = self.client.get(&url).send().await?;
        Self::read_json("user requirements", response).await
    }
}
