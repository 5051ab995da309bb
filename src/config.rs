//! Environment-driven service configuration

use crate::error::{MatchError, Result};
use std::time::Duration;
use tracing::Level;

pub const DEFAULT_BACKEND_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_FILTERED_VARIANTS_ENDPOINT: &str = "/api/v1/traceVenue/variant/filteredVariants";
pub const DEFAULT_USER_REQUIREMENTS_ENDPOINT: &str = "/api/v1/traceVenue/jobs";
pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub backend_base_url: String,
    pub filtered_variants_endpoint: String,
    pub user_requirements_endpoint: String,
    pub port: u16,
    pub log_level: Level,
    pub upstream_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            backend_base_url: DEFAULT_BACKEND_BASE_URL.to_string(),
            filtered_variants_endpoint: DEFAULT_FILTERED_VARIANTS_ENDPOINT.to_string(),
            user_requirements_endpoint: DEFAULT_USER_REQUIREMENTS_ENDPOINT.to_string(),
            port: DEFAULT_PORT,
            log_level: Level::INFO,
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        }
    }
}

impl ServiceConfig {
    /// Load from the process environment, reading `.env` first if present
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| MatchError::Config(format!("PORT must be a port number, got '{}'", raw)))?,
            None => defaults.port,
        };

        let upstream_timeout = match lookup("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(raw.trim().parse::<u64>().map_err(|_| {
                MatchError::Config(format!("UPSTREAM_TIMEOUT_SECS must be whole seconds, got '{}'", raw))
            })?),
            None => defaults.upstream_timeout,
        };

        Ok(Self {
            backend_base_url: lookup("BACKEND_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.backend_base_url),
            filtered_variants_endpoint: lookup("FILTERED_VARIANTS_ENDPOINT")
                .unwrap_or(defaults.filtered_variants_endpoint),
            user_requirements_endpoint: lookup("USER_REQUIREMENTS_BASE_ENDPOINT")
                .unwrap_or(defaults.user_requirements_endpoint),
            port,
            log_level: lookup("LOG_LEVEL")
                .map(|level| parse_level(&level))
                .unwrap_or(defaults.log_level),
            upstream_timeout,
        })
    }

    pub fn filtered_variants_url(&self) -> String {
        format!("{}{}", self.backend_base_url, self.filtered_variants_endpoint)
    }

    pub fn requirements_url(&self, job_id: &str) -> String {
        format!(
            "{}{}/{}",
            self.backend_base_url,
            self.user_requirements_endpoint,
            urlencoding::encode(job_id)
        )
    }
}

/// Unknown levels fall back to INFO
fn parse_level(raw: &str) -> Level {
    match raw.trim().to_ascii_uppercase().as_str() {
        "TRACE" => Level::TRACE,
        "DEBUG" => Level::DEBUG,
        "WARN" | "WARNING" => Level::WARN,
        "ERROR" | "CRITICAL" => Level::ERROR,
        _ => Level::INFO,
    }
}
