//! Item popularity across a batch of offerings, independent of any requirement

use crate::cuisines::CuisineDirectory;
use crate::flatten::flatten_package;
use crate::normalize::variant_menu;
use crate::types::*;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::{debug, warn};

#[derive(Debug, Default)]
struct KeyStats {
    presence: usize,
    total_quantity: u64,
}

/// Popularity over already-canonical offerings
pub fn analyze_offerings(offerings: &[PackageOffering]) -> PopularityReport {
    let mut stats: BTreeMap<FlatKey, KeyStats> = BTreeMap::new();

    for offering in offerings {
        accumulate(&mut stats, offering);
    }

    build_report(stats, offerings.len(), vec![])
}

/// Popularity over raw upstream variants.
///
/// A variant that cannot be normalized, or lists no items, is skipped with a
/// note; the rest of the batch is still counted.
pub fn analyze_variants(variants: &[Value], directory: &CuisineDirectory) -> PopularityReport {
    let mut stats: BTreeMap<FlatKey, KeyStats> = BTreeMap::new();
    let mut skipped = Vec::new();
    let mut considered = 0;

    for (idx, raw) in variants.iter().enumerate() {
        match variant_menu(raw, directory) {
            Ok(offering) => {
                accumulate(&mut stats, &offering);
                considered += 1;
            }
            Err(e) => {
                warn!("Skipping variant #{} in popularity analysis: {}", idx, e);
                skipped.push(format!("variant #{}: {}", idx, e));
            }
        }
    }

    build_report(stats, considered, skipped)
}

fn accumulate(stats: &mut BTreeMap<FlatKey, KeyStats>, offering: &PackageOffering) {
    let flat = flatten_package(offering);
    for (key, qty) in flat.quantities {
        let entry = stats.entry(key).or_default();
        entry.presence += 1;
        entry.total_quantity = entry.total_quantity.saturating_add(qty);
    }
}

fn build_report(
    stats: BTreeMap<FlatKey, KeyStats>,
    total_variants: usize,
    skipped: Vec<String>,
) -> PopularityReport {
    let mut items: Vec<ItemPopularity> = stats
        .into_iter()
        .map(|(key, s)| {
            let popularity = if total_variants > 0 {
                s.presence as f64 / total_variants as f64 * 100.0
            } else {
                0.0
            };
            let average = if s.presence > 0 {
                s.total_quantity as f64 / s.presence as f64
            } else {
                0.0
            };
            ItemPopularity {
                item_id: key.to_string(),
                item_name: key.item,
                category: key.category,
                cuisine: key.cuisine,
                subcategory: key.subcategory,
                variants_count: s.presence,
                popularity_percentage: round2(popularity),
                total_quantity_across_variants: s.total_quantity,
                average_quantity_per_variant: round2(average),
            }
        })
        .collect();

    // Keys arrive in FlatKey order, so ties stay deterministic under a stable sort
    items.sort_by(|a, b| {
        b.popularity_percentage
            .partial_cmp(&a.popularity_percentage)
            .unwrap_or(Ordering::Equal)
    });

    debug!(
        "Popularity: {} distinct items over {} variants ({} skipped)",
        items.len(),
        total_variants,
        skipped.len()
    );

    PopularityReport {
        items,
        total_variants,
        skipped,
    }
}
