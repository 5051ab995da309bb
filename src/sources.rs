//! Pluggable sources of raw requirement and variant documents

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Where the service gets its upstream documents from
#[async_trait]
pub trait MenuSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Variants matching a backend filter, in the backend's raw shape
    async fn fetch_variants(&self, filter: &Value) -> Result<Value>;

    /// Requirement document for one job
    async fn fetch_requirements(&self, job_id: &str) -> Result<Value>;
}

/// Fixed documents, for tests and offline runs
pub struct StaticMenuSource {
    variants: Value,
    requirements: Value,
}

impl StaticMenuSource {
    pub fn new(variants: Value, requirements: Value) -> Self {
        Self {
            variants,
            requirements,
        }
    }
}

#[async_trait]
impl MenuSource for StaticMenuSource {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn fetch_variants(&self, _filter: &Value) -> Result<Value> {
        Ok(self.variants.clone())
    }

    async fn fetch_requirements(&self, _job_id: &str) -> Result<Value> {
        Ok(self.requirements.clone())
    }
}
