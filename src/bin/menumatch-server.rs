//! menumatch HTTP server binary

use menumatch::{server, BackendClient, CuisineDirectory, MatchService, ServiceConfig, StaticMenuSource};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::from_env()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(config.log_level)
        .init();

    info!("menumatch {}", env!("CARGO_PKG_VERSION"));

    let cuisines = Arc::new(CuisineDirectory::builtin());

    // Check for --offline flag
    let offline = std::env::args().any(|arg| arg == "--offline");

    let service = if offline {
        info!("Mode: OFFLINE (built-in sample documents)");
        MatchService::new(
            Box::new(StaticMenuSource::new(sample_variants(), sample_requirements())),
            cuisines,
        )
    } else {
        info!("Mode: BACKEND at {}", config.backend_base_url);
        info!("Filtered variants endpoint: {}", config.filtered_variants_endpoint);
        info!("User requirements endpoint: {}", config.user_requirements_endpoint);

        let client = BackendClient::new(config.clone())?;
        if let Err(e) = client.ping().await {
            warn!("Backend is not reachable yet: {}", e);
        }
        MatchService::new(Box::new(client), cuisines)
    };

    server::run_server(service, config.port).await?;

    Ok(())
}

/// Sample requirement document in the backend's `menuSections` shape
fn sample_requirements() -> Value {
    json!({
        "data": {
            "menuSections": [
                {
                    "name": "Mains",
                    "subcategoriesByCuisine": {
                        "67ac7d222ee4b070bd485694": [
                            { "name": "Curry", "count": { "Paneer": 10, "Dal": 5 } },
                            { "name": "Breads", "count": { "Naan": 20 } }
                        ]
                    }
                },
                {
                    "name": "Desserts",
                    "count": [ { "name": "Gulab Jamun", "count": 12 } ]
                }
            ]
        }
    })
}

/// Sample filtered-variants response with two venues
fn sample_variants() -> Value {
    json!({
        "variants": [
            {
                "_id": "v-101",
                "name": "Royal Feast",
                "cost": 1450,
                "packageId": "pkg-1",
                "venueId": "venue-a",
                "availableMenuCount": [
                    {
                        "name": "Mains",
                        "subcategoriesByCuisine": {
                            "67ac7d222ee4b070bd485694": [
                                { "name": "Curry", "availableMenuCount": { "Paneer": 10, "Dal": 3 } },
                                { "name": "Breads", "availableMenuCount": { "Naan": 25 } }
                            ]
                        }
                    },
                    { "name": "Desserts", "availableMenuCount": { "Gulab Jamun": 12 } }
                ]
            },
            {
                "_id": "v-102",
                "name": "Classic Spread",
                "cost": "990",
                "packageId": "pkg-2",
                "venueId": "venue-a",
                "availableMenuCount": [
                    {
                        "name": "Mains",
                        "subcategoriesByCuisine": {
                            "67ac7d222ee4b070bd485694": [
                                { "name": "Curry", "availableMenuCount": [ { "name": "Paneer", "count": 6 } ] }
                            ]
                        }
                    }
                ]
            },
            {
                "_id": "v-201",
                "name": "Garden Buffet",
                "cost": 1200,
                "packageId": "pkg-3",
                "venueId": "venue-b",
                "availableMenuCount": { "Gulab Jamun": 20 }
            }
        ]
    })
}
