//! Per-venue best-package selection

use crate::types::*;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Keep the single best record per venue.
///
/// Records with an empty venue id are ignored here. Ids are compared
/// exactly as supplied. Within a venue the highest
/// match percentage wins; on an exact tie the record seen first wins.
/// Output is sorted by match percentage descending, stable over first
/// appearance of each venue.
pub fn best_per_venue(records: &[MatchRecord]) -> Vec<VenueBestMatch> {
    let mut order: Vec<&str> = Vec::new();
    let mut best: HashMap<&str, &MatchRecord> = HashMap::new();

    for record in records {
        let venue_id = record.venue_id.as_str();
        if venue_id.is_empty() {
            continue;
        }

        let replace = match best.get(venue_id) {
            Some(current) => is_better(record, current),
            None => {
                order.push(venue_id);
                true
            }
        };
        if replace {
            best.insert(venue_id, record);
        }
    }

    let mut venues: Vec<VenueBestMatch> = order
        .into_iter()
        .filter_map(|venue_id| {
            best.get(venue_id).map(|record| VenueBestMatch {
                venue_id: venue_id.to_string(),
                match_percentage: record.match_percentage(),
                best_variant_id: record.variant_id.clone(),
                best_variant_name: record.variant_name.clone(),
            })
        })
        .collect();

    venues.sort_by(|a, b| {
        b.match_percentage
            .partial_cmp(&a.match_percentage)
            .unwrap_or(Ordering::Equal)
    });

    venues
}

/// Strictly greater percentage only; equal keeps the incumbent
fn is_better(candidate: &MatchRecord, incumbent: &MatchRecord) -> bool {
    candidate.match_percentage() > incumbent.match_percentage()
}
