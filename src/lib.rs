//! menumatch - venue package matching
//!
//! Scores candidate venue menu packages against a customer's menu requirement:
//! - Four-level requirement/offering trees flattened to composite keys
//! - Weighted fulfillment ratios per category, cuisine and subcategory
//! - Item-level shortfalls and category-level surpluses
//! - Best package per venue
//! - Item popularity across offerings

pub mod types;
pub mod error;
pub mod config;
pub mod cuisines;
pub mod flatten;
pub mod scoring;
pub mod ranking;
pub mod selection;
pub mod popularity;
pub mod normalize;
pub mod sources;
pub mod backend_client;
pub mod match_engine;
pub mod server;

pub use types::*;
pub use error::{MatchError, NormalizeError};
pub use config::ServiceConfig;
pub use cuisines::CuisineDirectory;
pub use sources::{MenuSource, StaticMenuSource};
pub use backend_client::BackendClient;
pub use match_engine::{IntegratedMatchRequest, MatchService, SharedMatchService};

#[cfg(test)]
mod tests;
