//! MatchService: fetch, normalize, rank and reduce

use crate::cuisines::CuisineDirectory;
use crate::error::{MatchError, Result};
use crate::normalize::{normalize_variants, requirements_to_tree, variants_in};
use crate::popularity::analyze_variants;
use crate::ranking::rank_packages;
use crate::selection::best_per_venue;
use crate::sources::MenuSource;
use crate::types::*;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

pub const NO_VARIANTS_MESSAGE: &str = "No variants found matching your criteria";

/// Body of an integrated match request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntegratedMatchRequest {
    #[serde(default)]
    pub filter_data: Value,
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default, rename = "maxPerson")]
    pub max_person: Option<Value>,
}

/// Main matching service (thread-safe via Arc)
pub struct MatchService {
    pub source: Box<dyn MenuSource>,
    pub cuisines: Arc<CuisineDirectory>,
}

pub type SharedMatchService = Arc<MatchService>;

impl MatchService {
    pub fn new(source: Box<dyn MenuSource>, cuisines: Arc<CuisineDirectory>) -> SharedMatchService {
        Arc::new(Self { source, cuisines })
    }

    /// Fetch both documents from the source, then match
    pub async fn match_integrated(&self, req: IntegratedMatchRequest) -> Result<MatchResponse> {
        let mut filter = match req.filter_data {
            Value::Object(map) if !map.is_empty() => map,
            _ => return Err(MatchError::InvalidRequest("Missing filter_data in request".to_string())),
        };
        let job_id = req
            .job_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| MatchError::InvalidRequest("Missing job_id in request".to_string()))?;
        if let Some(max_person) = req.max_person {
            filter.insert("maxPerson".to_string(), max_person);
        }
        let filter = Value::Object(filter);

        info!(
            "Integrated match: job_id='{}', source={}",
            job_id,
            self.source.name()
        );

        let (variants, requirements) = futures::try_join!(
            self.source.fetch_variants(&filter),
            self.source.fetch_requirements(&job_id),
        )?;

        self.match_documents(&requirements, &variants)
    }

    /// Match inline documents in the upstream shapes
    pub fn match_documents(&self, requirements: &Value, variants: &Value) -> Result<MatchResponse> {
        let start = Instant::now();

        if variants_in(variants).is_empty() {
            info!("No variants to match");
            return Ok(MatchResponse::empty(NO_VARIANTS_MESSAGE));
        }

        let batch = normalize_variants(variants, &self.cuisines);
        if batch.offerings.is_empty() {
            warn!("None of the variants could be normalized");
            return Ok(MatchResponse::empty("Could not adapt variant data"));
        }

        let requirement = requirements_to_tree(requirements, &self.cuisines);
        if requirement.is_empty() {
            warn!("No categories found in user requirements");
            return Err(MatchError::NoRequirements);
        }

        let response = self.match_offerings(&requirement, &batch.offerings);

        info!(
            "Matched {} variants into {} venues in {}ms ({} skipped)",
            response.matched_variants,
            response.venue_matches.len(),
            start.elapsed().as_millis(),
            batch.skipped.len()
        );
        Ok(response)
    }

    /// Rank canonical offerings and reduce to one per venue
    pub fn match_offerings(
        &self,
        requirement: &RequirementTree,
        offerings: &[PackageOffering],
    ) -> MatchResponse {
        let records = rank_packages(requirement, offerings);
        let venue_matches = best_per_venue(&records);
        let matches: Vec<PackageMatchReport> = records.iter().map(MatchRecord::to_report).collect();

        MatchResponse {
            status: "success".to_string(),
            message: None,
            total_variants: offerings.len(),
            matched_variants: matches.len(),
            matches,
            venue_matches,
        }
    }

    pub fn item_popularity(&self, variants: &Value) -> PopularityReport {
        analyze_variants(variants_in(variants), &self.cuisines)
    }
}
