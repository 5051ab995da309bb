//! Scoring of a flattened offering against a flattened requirement

use crate::types::*;
use std::collections::{BTreeMap, HashMap};

/// Weighted ratio accumulator for one aggregation key.
///
/// Both sums are kept in `f64` so the ratio stays within [0, 1] for any
/// quantity.
#[derive(Debug, Default, Clone, Copy)]
struct LevelAccumulator {
    weighted: f64,
    weight: f64,
}

impl LevelAccumulator {
    fn add(&mut self, item_ratio: f64, requested: u64) {
        let requested = requested as f64;
        self.weighted += item_ratio * requested;
        self.weight += requested;
    }

    fn ratio(&self) -> Option<f64> {
        if self.weight > 0.0 {
            Some((self.weighted / self.weight).min(1.0))
        } else {
            None
        }
    }
}

/// Score one offering. Pure: neither input is modified.
pub fn score_match(requirement: &FlatMenu, offering: &FlatMenu) -> MatchScore {
    let mut matched: u64 = 0;
    let mut levels: HashMap<String, LevelAccumulator> = HashMap::new();
    let mut unmet = Vec::new();

    for (key, &requested) in &requirement.quantities {
        let available = offering.get(key);
        let ratio = item_ratio(requested, available);

        matched = matched.saturating_add(available.min(requested));

        if available < requested {
            unmet.push(UnmetRequirement {
                category: key.category.clone(),
                cuisine: key.cuisine.clone(),
                subcategory: key.subcategory.clone(),
                item: key.item.clone(),
                requested,
                available,
                shortfall: requested - available,
                message: format!(
                    "Insufficient {} in {}: need {}, have {}",
                    key.item, key.subcategory, requested, available
                ),
            });
        }

        for level_key in [key.category_key(), key.cuisine_key(), key.subcategory_key()] {
            levels.entry(level_key).or_default().add(ratio, requested);
        }
    }

    let level_ratios: BTreeMap<String, f64> = levels
        .into_iter()
        .filter_map(|(key, acc)| acc.ratio().map(|r| (key, r)))
        .collect();

    let overall_ratio = if requirement.total > 0 {
        matched as f64 / requirement.total as f64
    } else {
        0.0
    };

    MatchScore {
        overall_ratio,
        level_ratios,
        unmet,
        over_fulfilled: over_fulfilled_categories(requirement, offering),
    }
}

fn item_ratio(requested: u64, available: u64) -> f64 {
    if requested == 0 {
        0.0
    } else if available >= requested {
        1.0
    } else {
        available as f64 / requested as f64
    }
}

/// Top-level categories whose offered total exceeds the requested total.
///
/// Offered totals include items that were never requested; categories
/// absent from the requirement are never reported.
pub fn over_fulfilled_categories(
    requirement: &FlatMenu,
    offering: &FlatMenu,
) -> BTreeMap<String, OverFulfillment> {
    let requested = category_totals(requirement);
    let offered = category_totals(offering);

    requested
        .into_iter()
        .filter_map(|(category, requested_total)| {
            let offered_total = offered.get(&category).copied().unwrap_or(0);
            if requested_total > 0 && offered_total > requested_total {
                let over = OverFulfillment {
                    requested_total,
                    offered_total,
                    percentage: offered_total as f64 / requested_total as f64 * 100.0,
                    surplus: offered_total - requested_total,
                };
                Some((category, over))
            } else {
                None
            }
        })
        .collect()
}

fn category_totals(flat: &FlatMenu) -> BTreeMap<String, u64> {
    let mut totals: BTreeMap<String, u64> = BTreeMap::new();
    for (key, qty) in &flat.quantities {
        let total = totals.entry(key.category.clone()).or_insert(0);
        *total = total.saturating_add(*qty);
    }
    totals
}
