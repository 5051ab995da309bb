//! Ranking of candidate packages against one requirement

use crate::flatten::{flatten_package, flatten_requirements};
use crate::scoring::score_match;
use crate::types::*;
use std::cmp::Ordering;
use tracing::debug;

/// Score every package and order by overall ratio, descending.
///
/// The sort is stable, so equal scores keep the order packages were supplied in.
pub fn rank_packages(requirement: &RequirementTree, packages: &[PackageOffering]) -> Vec<MatchRecord> {
    let flat_req = flatten_requirements(requirement);
    debug!(
        "Ranking {} packages against {} requested keys ({} items)",
        packages.len(),
        flat_req.quantities.len(),
        flat_req.total
    );

    let mut records: Vec<MatchRecord> = packages
        .iter()
        .map(|package| {
            let flat_offer = flatten_package(package);
            MatchRecord {
                variant_id: package.id.clone(),
                variant_name: package.name.clone(),
                price: package.price,
                rating: package.rating,
                package_id: package.package_id.clone(),
                venue_id: package.venue_id.clone(),
                score: score_match(&flat_req, &flat_offer),
            }
        })
        .collect();

    records.sort_by(|a, b| {
        b.score
            .overall_ratio
            .partial_cmp(&a.score.overall_ratio)
            .unwrap_or(Ordering::Equal)
    });

    records
}
