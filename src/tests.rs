//! Unit tests for flattening, scoring, ranking, venue selection and the service

use crate::flatten::{flatten_package, flatten_tree};
use crate::popularity::{analyze_offerings, analyze_variants};
use crate::ranking::rank_packages;
use crate::scoring::score_match;
use crate::selection::best_per_venue;
use crate::*;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const INDIAN_ID: &str = "67ac7d222ee4b070bd485694";

/// Helper: requirement with a single Paneer line
fn paneer_requirement(qty: i64) -> RequirementTree {
    MenuTree::new().with_item("Mains", "Indian", "Curry", "Paneer", qty)
}

/// Helper: package offering Paneer only
fn paneer_package(id: &str, venue: &str, qty: i64) -> PackageOffering {
    PackageOffering {
        id: id.to_string(),
        name: format!("Package {}", id),
        price: 1000.0,
        rating: 4.0,
        package_id: format!("pkg_{}", id),
        venue_id: venue.to_string(),
        menu: MenuTree::new().with_item("Mains", "Indian", "Curry", "Paneer", qty),
    }
}

fn score_trees(req: &MenuTree, offer: &MenuTree) -> MatchScore {
    score_match(&flatten_tree(req), &flatten_tree(offer))
}

#[test]
fn test_flatten_drops_non_positive_quantities() {
    let tree = MenuTree::new()
        .with_item("Mains", "Indian", "Curry", "Paneer", 10)
        .with_item("Mains", "Indian", "Curry", "Dal", 0)
        .with_item("Mains", "Indian", "Breads", "Naan", -2)
        .with_item("Desserts", "General", "General", "Kheer", 3);

    let flat = flatten_tree(&tree);

    assert_eq!(flat.quantities.len(), 2);
    assert_eq!(flat.total, 13);
    assert_eq!(flat.get(&FlatKey::new("Mains", "Indian", "Curry", "Paneer")), 10);
    assert_eq!(flat.get(&FlatKey::new("Mains", "Indian", "Curry", "Dal")), 0);

    // Idempotent
    assert_eq!(flatten_tree(&tree), flat);
}

#[test]
fn test_flat_key_keeps_components_distinct() {
    // Joined text would collide, the keys must not
    let tree = MenuTree::new()
        .with_item("A|B", "C", "D", "E", 1)
        .with_item("A", "B|C", "D", "E", 2);

    let flat = flatten_tree(&tree);

    assert_eq!(flat.quantities.len(), 2);
    assert_eq!(flat.total, 3);
    let key = FlatKey::new("Mains", "Indian", "Curry", "Paneer");
    assert_eq!(key.to_string(), "Mains|Indian|Curry|Paneer");
    assert_eq!(key.subcategory_key(), "Mains|Indian|Curry");
}

#[test]
fn test_empty_tree_flattens_to_nothing() {
    let flat = flatten_tree(&MenuTree::new());
    assert!(flat.is_empty());
    assert_eq!(flat.total, 0);
}

#[test]
fn test_partial_fulfillment_reports_shortfall() {
    let score = score_trees(&paneer_requirement(10), &paneer_requirement(6));

    assert!((score.overall_ratio - 0.6).abs() < 1e-9);
    assert_eq!(score.unmet.len(), 1);
    let unmet = &score.unmet[0];
    assert_eq!(unmet.item, "Paneer");
    assert_eq!(unmet.requested, 10);
    assert_eq!(unmet.available, 6);
    assert_eq!(unmet.shortfall, 4);
    assert_eq!(unmet.message, "Insufficient Paneer in Curry: need 10, have 6");
    assert!(score.over_fulfilled.is_empty());
}

#[test]
fn test_surplus_reports_over_fulfilled_category() {
    let score = score_trees(&paneer_requirement(10), &paneer_requirement(15));

    assert_eq!(score.overall_ratio, 1.0);
    assert!(score.unmet.is_empty());
    let over = score.over_fulfilled.get("Mains").expect("Mains should be over-fulfilled");
    assert_eq!(over.requested_total, 10);
    assert_eq!(over.offered_total, 15);
    assert!((over.percentage - 150.0).abs() < 1e-9);
    assert_eq!(over.surplus, 5);
}

#[test]
fn test_empty_requirement_scores_zero() {
    let score = score_trees(&MenuTree::new(), &paneer_requirement(15));

    assert_eq!(score.overall_ratio, 0.0);
    assert!(score.unmet.is_empty());
    assert!(score.level_ratios.is_empty());
    assert!(score.over_fulfilled.is_empty());
}

#[test]
fn test_level_ratios_are_weighted_by_requested_quantity() {
    let req = MenuTree::new()
        .with_item("Mains", "Indian", "Curry", "Paneer", 10)
        .with_item("Mains", "Indian", "Breads", "Naan", 30);
    let offer = MenuTree::new()
        .with_item("Mains", "Indian", "Curry", "Paneer", 5)
        .with_item("Mains", "Indian", "Breads", "Naan", 30);

    let score = score_trees(&req, &offer);

    // (0.5 * 10 + 1.0 * 30) / 40
    assert!((score.level_ratios["Mains"] - 0.875).abs() < 1e-9);
    assert!((score.level_ratios["Mains|Indian"] - 0.875).abs() < 1e-9);
    assert!((score.level_ratios["Mains|Indian|Curry"] - 0.5).abs() < 1e-9);
    assert!((score.level_ratios["Mains|Indian|Breads"] - 1.0).abs() < 1e-9);
    assert_eq!(score.level_ratios.len(), 4);
    assert!((score.overall_ratio - 35.0 / 40.0).abs() < 1e-9);
}

#[test]
fn test_over_fulfillment_counts_unrequested_items_in_requested_categories() {
    let req = MenuTree::new()
        .with_item("Mains", "Indian", "Curry", "Paneer", 10)
        .with_item("Desserts", "General", "General", "Kheer", 4);
    let offer = MenuTree::new()
        .with_item("Mains", "Indian", "Curry", "Paneer", 8)
        .with_item("Mains", "Chinese", "Noodles", "Hakka", 5)
        .with_item("Desserts", "General", "General", "Kheer", 4)
        .with_item("Starters", "General", "General", "Tikka", 50);

    let score = score_trees(&req, &offer);

    // Mains offered 13 > 10 even though Paneer itself falls short
    let mains = &score.over_fulfilled["Mains"];
    assert_eq!(mains.offered_total, 13);
    assert_eq!(mains.surplus, 3);
    assert_eq!(score.unmet.len(), 1);
    // Equal totals and unrequested categories produce nothing
    assert!(!score.over_fulfilled.contains_key("Desserts"));
    assert!(!score.over_fulfilled.contains_key("Starters"));
}

#[test]
fn test_over_fulfillment_disappears_when_surplus_removed() {
    let req = paneer_requirement(10);
    assert!(score_trees(&req, &paneer_requirement(11)).over_fulfilled.contains_key("Mains"));
    assert!(score_trees(&req, &paneer_requirement(10)).over_fulfilled.is_empty());
}

#[test]
fn test_more_offered_never_lowers_scores() {
    let req = MenuTree::new()
        .with_item("Mains", "Indian", "Curry", "Paneer", 10)
        .with_item("Mains", "Indian", "Curry", "Dal", 6);

    let mut previous: Option<MatchScore> = None;
    for paneer in 0..=14 {
        let offer = MenuTree::new()
            .with_item("Mains", "Indian", "Curry", "Paneer", paneer)
            .with_item("Mains", "Indian", "Curry", "Dal", 3);
        let score = score_trees(&req, &offer);

        assert!((0.0..=1.0).contains(&score.overall_ratio));
        if let Some(prev) = &previous {
            assert!(score.overall_ratio >= prev.overall_ratio);
            for (key, ratio) in &score.level_ratios {
                assert!(*ratio >= prev.level_ratios.get(key).copied().unwrap_or(0.0));
            }
        }
        previous = Some(score);
    }
}

#[test]
fn test_full_ratio_only_when_every_key_is_met() {
    let req = MenuTree::new()
        .with_item("Mains", "Indian", "Curry", "Paneer", 10)
        .with_item("Mains", "Indian", "Curry", "Dal", 6);
    let short = MenuTree::new()
        .with_item("Mains", "Indian", "Curry", "Paneer", 100)
        .with_item("Mains", "Indian", "Curry", "Dal", 5);
    let full = MenuTree::new()
        .with_item("Mains", "Indian", "Curry", "Paneer", 10)
        .with_item("Mains", "Indian", "Curry", "Dal", 6);

    assert!(score_trees(&req, &short).overall_ratio < 1.0);
    assert_eq!(score_trees(&req, &full).overall_ratio, 1.0);
}

#[test]
fn test_ranking_is_stable_on_ties() {
    let packages = vec![
        paneer_package("A", "v1", 5),
        paneer_package("B", "v2", 5),
        paneer_package("C", "v3", 9),
    ];

    let ranked = rank_packages(&paneer_requirement(10), &packages);

    let ids: Vec<&str> = ranked.iter().map(|r| r.variant_id.as_str()).collect();
    assert_eq!(ids, vec!["C", "A", "B"]);
    assert_eq!(ranked[0].match_percentage(), 90.0);
    assert_eq!(ranked[1].match_percentage(), 50.0);
}

#[test]
fn test_ranking_does_not_touch_requirement() {
    let req = paneer_requirement(10);
    let before = req.clone();
    let packages = vec![paneer_package("A", "v1", 3), paneer_package("B", "v1", 30)];

    let first = rank_packages(&req, &packages);
    let second = rank_packages(&req, &packages);

    assert_eq!(req, before);
    assert_eq!(first, second);
}

#[test]
fn test_best_per_venue_keeps_maximum() {
    let packages = vec![
        paneer_package("a1", "venue-a", 4),
        paneer_package("b1", "venue-b", 7),
        paneer_package("a2", "venue-a", 9),
        paneer_package("x1", "", 10),
        paneer_package("b2", "venue-b", 2),
    ];
    let ranked = rank_packages(&paneer_requirement(10), &packages);

    let venues = best_per_venue(&ranked);

    assert_eq!(venues.len(), 2);
    assert_eq!(venues[0].venue_id, "venue-a");
    assert_eq!(venues[0].best_variant_id, "a2");
    assert_eq!(venues[0].match_percentage, 90.0);
    assert_eq!(venues[1].venue_id, "venue-b");
    assert_eq!(venues[1].best_variant_id, "b1");
    assert_eq!(venues[1].best_variant_name, "Package b1");
    // Venue-less package stays in the ranked list only
    assert_eq!(ranked[0].variant_id, "x1");
}

#[test]
fn test_best_per_venue_tie_keeps_first_seen() {
    let packages = vec![
        paneer_package("first", "venue-a", 5),
        paneer_package("second", "venue-a", 5),
    ];
    let ranked = rank_packages(&paneer_requirement(10), &packages);

    let venues = best_per_venue(&ranked);

    assert_eq!(venues.len(), 1);
    assert_eq!(venues[0].best_variant_id, "first");
}

#[test]
fn test_contains_egg_is_derived() {
    let tree = MenuTree::new()
        .with_item("Breakfast", "Continental", "Mains", "Egg", 2)
        .with_item("Breakfast", "Indian", "Mains", "Egg", 0)
        .with_item("Breakfast", "Indian", "Mains", "Poha", 5);

    let cuisines = &tree.categories["Breakfast"].cuisines;
    assert!(cuisines["Continental"].contains_egg());
    assert!(!cuisines["Indian"].contains_egg());
}

#[test]
fn test_popularity_over_offerings() {
    let mut o1 = paneer_package("1", "v", 10);
    o1.menu.insert_item("Desserts", "General", "General", "Jamun", 5);
    let o2 = paneer_package("2", "v", 6);
    let mut o3 = paneer_package("3", "v", 0);
    o3.menu.insert_item("Starters", "General", "General", "Tikka", 4);

    let report = analyze_offerings(&[o1, o2, o3]);

    assert_eq!(report.total_variants, 3);
    assert!(report.skipped.is_empty());
    assert_eq!(report.items.len(), 3);

    let top = &report.items[0];
    assert_eq!(top.item_id, "Mains|Indian|Curry|Paneer");
    assert_eq!(top.item_name, "Paneer");
    assert_eq!(top.variants_count, 2);
    assert_eq!(top.popularity_percentage, 66.67);
    assert_eq!(top.total_quantity_across_variants, 16);
    assert_eq!(top.average_quantity_per_variant, 8.0);

    assert_eq!(report.items[1].item_name, "Jamun");
    assert_eq!(report.items[2].item_name, "Tikka");
    assert_eq!(report.items[2].popularity_percentage, 33.33);
}

#[test]
fn test_popularity_skips_malformed_variants() {
    let variants = vec![
        json!({
            "_id": "v1",
            "name": "Good",
            "availableMenuCount": { "Samosa": 4 }
        }),
        json!("not a variant"),
        json!({}),
    ];

    let report = analyze_variants(&variants, &CuisineDirectory::default());

    assert_eq!(report.total_variants, 1);
    assert_eq!(report.skipped.len(), 2);
    assert!(report.skipped[0].starts_with("variant #1"));
    assert_eq!(report.items.len(), 1);
    assert_eq!(report.items[0].item_id, "Menu Items|General|General|Samosa");
    assert_eq!(report.items[0].popularity_percentage, 100.0);
}

#[test]
fn test_variant_normalization() {
    let directory = CuisineDirectory::builtin();
    let raw = json!({
        "$__": {},
        "_doc": {
            "_id": "v-9",
            "name": "Wrapped",
            "cost": "1250.5",
            "packageId": "pkg-9",
            "venueId": "venue-z",
            "availableMenuCount": [{
                "name": "Mains",
                "subcategoriesByCuisine": {
                    INDIAN_ID: [
                        { "name": "Curry", "availableMenuCount": { "Paneer": 4, "Egg": 1 } }
                    ]
                }
            }]
        }
    });

    let offering = normalize::variant_to_offering(&raw, &directory).unwrap();

    assert_eq!(offering.id, "v-9");
    assert_eq!(offering.price, 1250.5);
    assert_eq!(offering.rating, 0.0);
    assert_eq!(offering.venue_id, "venue-z");
    let indian = &offering.menu.categories["Mains"].cuisines["Indian"];
    assert_eq!(indian.subcategories["Curry"].items["Paneer"], 4);
    assert!(indian.contains_egg());
}

#[test]
fn test_variant_without_menu_gets_placeholder_or_is_skipped() {
    let directory = CuisineDirectory::default();

    let named = json!({ "_id": "v1", "name": "Bare", "availableMenuCount": { "Soup": 0 } });
    let offering = normalize::variant_to_offering(&named, &directory).unwrap();
    let flat = flatten_package(&offering);
    assert_eq!(flat.total, 1);
    assert_eq!(
        flat.get(&FlatKey::new("Menu Items", "General", "General", "Default")),
        1
    );

    let anonymous = json!({ "name": "No id" });
    assert_eq!(
        normalize::variant_to_offering(&anonymous, &directory),
        Err(NormalizeError::EmptyMenu { variant: "No id".to_string() })
    );
}

#[test]
fn test_cuisine_directory_resolves_known_ids_only() {
    let directory = CuisineDirectory::builtin();
    assert_eq!(directory.len(), 11);
    assert_eq!(directory.resolve(INDIAN_ID), "Indian");
    assert_eq!(directory.resolve("Fusion"), "Fusion");
}

#[test]
fn test_config_from_lookup() {
    let config = ServiceConfig::from_lookup(|key| match key {
        "BACKEND_BASE_URL" => Some("http://backend:9000/".to_string()),
        "PORT" => Some("7000".to_string()),
        "LOG_LEVEL" => Some("debug".to_string()),
        _ => None,
    })
    .unwrap();

    assert_eq!(config.port, 7000);
    assert_eq!(config.log_level, tracing::Level::DEBUG);
    assert_eq!(
        config.requirements_url("job 1"),
        "http://backend:9000/api/v1/traceVenue/jobs/job%201"
    );
    assert_eq!(
        config.filtered_variants_url(),
        "http://backend:9000/api/v1/traceVenue/variant/filteredVariants"
    );

    let bad = ServiceConfig::from_lookup(|key| (key == "PORT").then(|| "eighty".to_string()));
    assert!(matches!(bad, Err(MatchError::Config(_))));
}

/// Requirement document in the backend's nested shape
fn sample_requirements() -> Value {
    json!({
        "data": {
            "menuSections": [{
                "name": "Mains",
                "subcategoriesByCuisine": {
                    INDIAN_ID: [ { "name": "Curry", "count": { "Paneer": 10 } } ]
                }
            }]
        }
    })
}

fn sample_variants() -> Value {
    let variant = |id: &str, venue: &str, qty: i64| {
        json!({
            "_id": id,
            "name": format!("Variant {}", id),
            "cost": 900,
            "packageId": "pkg",
            "venueId": venue,
            "availableMenuCount": [{
                "name": "Mains",
                "subcategoriesByCuisine": {
                    "Indian": [ { "name": "Curry", "availableMenuCount": [ { "name": "Paneer", "count": qty } ] } ]
                }
            }]
        })
    };
    json!({
        "variants": [
            variant("v1", "venue-a", 6),
            variant("v2", "venue-a", 15),
            variant("v3", "venue-b", 8),
        ]
    })
}

fn sample_service(variants: Value, requirements: Value) -> SharedMatchService {
    MatchService::new(
        Box::new(StaticMenuSource::new(variants, requirements)),
        Arc::new(CuisineDirectory::builtin()),
    )
}

fn integrated_request() -> IntegratedMatchRequest {
    IntegratedMatchRequest {
        filter_data: json!({ "city": "Pune" }),
        job_id: Some("job-1".to_string()),
        max_person: Some(json!(200)),
    }
}

#[tokio::test]
async fn test_end_to_end_integrated_match() {
    let service = sample_service(sample_variants(), sample_requirements());

    let response = service.match_integrated(integrated_request()).await.unwrap();

    assert_eq!(response.status, "success");
    assert_eq!(response.total_variants, 3);
    assert_eq!(response.matched_variants, 3);

    let ids: Vec<&str> = response.matches.iter().map(|m| m.variant_id.as_str()).collect();
    assert_eq!(ids, vec!["v2", "v3", "v1"]);
    assert_eq!(response.matches[0].match_percentage, 100.0);
    assert_eq!(response.matches[0].over_100_categories["Mains"].percentage, 150.0);
    assert_eq!(response.matches[2].match_percentage, 60.0);
    assert_eq!(response.matches[2].category_matches["Mains|Indian|Curry"], 60.0);
    assert_eq!(response.matches[2].unmet_requirements[0].shortfall, 4);

    assert_eq!(response.venue_matches.len(), 2);
    assert_eq!(response.venue_matches[0].venue_id, "venue-a");
    assert_eq!(response.venue_matches[0].best_variant_id, "v2");
    assert_eq!(response.venue_matches[1].match_percentage, 80.0);
}

#[tokio::test]
async fn test_integrated_match_validates_request() {
    let service = sample_service(sample_variants(), sample_requirements());

    let mut missing_job = integrated_request();
    missing_job.job_id = Some("  ".to_string());
    let err = service.match_integrated(missing_job).await.unwrap_err();
    assert!(matches!(err, MatchError::InvalidRequest(_)));

    let mut missing_filter = integrated_request();
    missing_filter.filter_data = json!({});
    let err = service.match_integrated(missing_filter).await.unwrap_err();
    assert!(matches!(err, MatchError::InvalidRequest(_)));
}

#[test]
fn test_integrated_match_without_variants_or_requirements() {
    let service = sample_service(json!({ "variants": [] }), sample_requirements());
    let response = tokio_test::block_on(service.match_integrated(integrated_request())).unwrap();
    assert!(response.matches.is_empty());
    assert_eq!(response.message.as_deref(), Some(match_engine::NO_VARIANTS_MESSAGE));

    let service = sample_service(sample_variants(), json!({ "data": { "other": 1 } }));
    let err = tokio_test::block_on(service.match_integrated(integrated_request())).unwrap_err();
    assert!(matches!(err, MatchError::NoRequirements));
}

async fn post_json(service: SharedMatchService, uri: &str, body: Value) -> (StatusCode, Value) {
    let app = server::create_router(service);
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_router_match_documents() {
    let service = sample_service(Value::Null, Value::Null);
    let body = json!({ "requirements": sample_requirements(), "variants": sample_variants() });

    let (status, json) = post_json(service, "/api/match", body).await;

    assert_eq!(status, StatusCode::OK);
    let response: MatchResponse = serde_json::from_value(json).unwrap();
    assert_eq!(response.matches.len(), 3);
    assert_eq!(response.venue_matches.len(), 2);
}

#[tokio::test]
async fn test_router_maps_errors_to_status_codes() {
    let service = sample_service(sample_variants(), sample_requirements());
    let (status, json) = post_json(
        service.clone(),
        "/api/match-restaurants-integrated",
        json!({ "job_id": "job-1" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["details"], "Invalid request: Missing filter_data in request");

    let (status, _) = post_json(
        service,
        "/api/match",
        json!({ "requirements": {}, "variants": sample_variants() }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_router_popularity_and_health() {
    let service = sample_service(Value::Null, Value::Null);

    let (status, json) = post_json(
        service.clone(),
        "/api/item-popularity",
        json!({ "variants": sample_variants() }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let report: PopularityReport = serde_json::from_value(json).unwrap();
    assert_eq!(report.total_variants, 3);
    assert_eq!(report.items.len(), 1);
    assert_eq!(report.items[0].total_quantity_across_variants, 29);

    let app = server::create_router(service);
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[test]
fn test_huge_quantities_are_clamped_and_never_overflow() {
    let service = sample_service(Value::Null, Value::Null);
    let requirements = json!({ "count": { "A": 9.0e18, "B": 9.0e18, "C": 9.0e18 } });
    let variants = json!({
        "variants": [{
            "_id": "v1",
            "name": "Big",
            "venueId": "venue-a",
            "availableMenuCount": { "A": 9.0e18, "B": 1 }
        }]
    });

    let response = service.match_documents(&requirements, &variants).unwrap();

    let record = &response.matches[0];
    assert!((0.0..=100.0).contains(&record.match_percentage));
    assert_eq!(record.match_percentage, 33.33);
    assert_eq!(record.unmet_requirements.len(), 2);
    assert_eq!(
        record.unmet_requirements[0].requested,
        normalize::MAX_QUANTITY as u64
    );
}

#[test]
fn test_core_saturates_on_oversized_trees() {
    // Canonical trees built directly bypass the upstream clamp
    let tree = MenuTree::new()
        .with_item("Mains", "Indian", "Curry", "A", i64::MAX)
        .with_item("Mains", "Indian", "Curry", "B", i64::MAX)
        .with_item("Mains", "Indian", "Curry", "C", i64::MAX);

    let flat = flatten_tree(&tree);
    assert_eq!(flat.total, u64::MAX);

    let score = score_trees(&tree, &tree);
    assert_eq!(score.overall_ratio, 1.0);
    assert!(score.over_fulfilled.is_empty());
    assert!((score.level_ratios["Mains"] - 1.0).abs() < 1e-9);

    let package = PackageOffering {
        menu: tree,
        ..paneer_package("big", "v", 0)
    };
    let report = analyze_offerings(&[package.clone(), package]);
    assert_eq!(report.items[0].total_quantity_across_variants, u64::MAX);
}

#[test]
fn test_popularity_skips_menu_less_variants_instead_of_placeholder() {
    let variants = vec![
        json!({ "_id": "v1", "name": "Real", "availableMenuCount": { "Samosa": 2 } }),
        json!({ "_id": "v2", "name": "Bare" }),
    ];

    let report = analyze_variants(&variants, &CuisineDirectory::default());

    assert_eq!(report.total_variants, 1);
    assert_eq!(report.skipped, vec!["variant #1: variant 'Bare' has no menu items".to_string()]);
    assert_eq!(report.items.len(), 1);
    assert!(report.items.iter().all(|item| item.item_name != normalize::PLACEHOLDER_ITEM));
    assert_eq!(report.items[0].popularity_percentage, 100.0);
}

#[test]
fn test_best_per_venue_compares_ids_exactly() {
    let packages = vec![
        paneer_package("padded", "venue-a ", 9),
        paneer_package("plain", "venue-a", 4),
    ];
    let ranked = rank_packages(&paneer_requirement(10), &packages);

    let venues = best_per_venue(&ranked);

    assert_eq!(venues.len(), 2);
    assert_eq!(venues[0].venue_id, "venue-a ");
    assert_eq!(venues[0].best_variant_id, "padded");
    assert_eq!(venues[1].venue_id, "venue-a");
    assert_eq!(venues[1].best_variant_id, "plain");
}
