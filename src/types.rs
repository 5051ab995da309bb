//! Core type definitions for menu requirement matching

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Item name that marks a cuisine as containing egg
pub const EGG_ITEM: &str = "Egg";

/// Leaf level of the menu tree: item name -> quantity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subcategory {
    pub name: String,
    pub items: BTreeMap<String, i64>,
}

impl Subcategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cuisine {
    pub name: String,
    pub subcategories: BTreeMap<String, Subcategory>,
}

impl Cuisine {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subcategories: BTreeMap::new(),
        }
    }

    /// True if any subcategory lists a positive quantity of "Egg"
    pub fn contains_egg(&self) -> bool {
        self.subcategories
            .values()
            .any(|sub| sub.items.get(EGG_ITEM).is_some_and(|qty| *qty > 0))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub cuisines: BTreeMap<String, Cuisine>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cuisines: BTreeMap::new(),
        }
    }
}

/// Four-level count tree: category -> cuisine -> subcategory -> item.
///
/// Names are unique per level because every level is keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuTree {
    pub categories: BTreeMap<String, Category>,
}

impl MenuTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the quantity at a full path, creating intermediate levels.
    /// Returns the previous quantity if the item already existed.
    pub fn insert_item(
        &mut self,
        category: &str,
        cuisine: &str,
        subcategory: &str,
        item: &str,
        quantity: i64,
    ) -> Option<i64> {
        self.categories
            .entry(category.to_string())
            .or_insert_with(|| Category::new(category))
            .cuisines
            .entry(cuisine.to_string())
            .or_insert_with(|| Cuisine::new(cuisine))
            .subcategories
            .entry(subcategory.to_string())
            .or_insert_with(|| Subcategory::new(subcategory))
            .items
            .insert(item.to_string(), quantity)
    }

    /// Builder-style variant of [`MenuTree::insert_item`]
    pub fn with_item(
        mut self,
        category: &str,
        cuisine: &str,
        subcategory: &str,
        item: &str,
        quantity: i64,
    ) -> Self {
        self.insert_item(category, cuisine, subcategory, item, quantity);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// What a customer asked for
pub type RequirementTree = MenuTree;

/// One candidate package offered by a venue
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageOffering {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub rating: f64,
    pub package_id: String,
    pub venue_id: String, // empty when the upstream record has none
    pub menu: MenuTree,
}

/// Full path of one item; never collapses distinct paths
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct FlatKey {
    pub category: String,
    pub cuisine: String,
    pub subcategory: String,
    pub item: String,
}

impl FlatKey {
    pub fn new(
        category: impl Into<String>,
        cuisine: impl Into<String>,
        subcategory: impl Into<String>,
        item: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            cuisine: cuisine.into(),
            subcategory: subcategory.into(),
            item: item.into(),
        }
    }

    /// Aggregation keys for prefix lengths 1..=3
    pub fn category_key(&self) -> String {
        self.category.clone()
    }

    pub fn cuisine_key(&self) -> String {
        format!("{}|{}", self.category, self.cuisine)
    }

    pub fn subcategory_key(&self) -> String {
        format!("{}|{}|{}", self.category, self.cuisine, self.subcategory)
    }
}

impl fmt::Display for FlatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}",
            self.category, self.cuisine, self.subcategory, self.item
        )
    }
}

/// Flattened tree: positive quantities only, plus their sum
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatMenu {
    pub quantities: BTreeMap<FlatKey, u64>,
    pub total: u64,
}

impl FlatMenu {
    pub fn get(&self, key: &FlatKey) -> u64 {
        self.quantities.get(key).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }
}

/// Item-level shortfall
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnmetRequirement {
    pub category: String,
    pub cuisine: String,
    pub subcategory: String,
    pub item: String,
    pub requested: u64,
    pub available: u64,
    pub shortfall: u64,
    pub message: String,
}

/// Top-level category surplus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverFulfillment {
    pub requested_total: u64,
    pub offered_total: u64,
    pub percentage: f64, // may exceed 100
    pub surplus: u64,
}

/// Result of scoring one flattened offering against a flattened requirement
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchScore {
    pub overall_ratio: f64,                        // 0.0-1.0
    pub level_ratios: BTreeMap<String, f64>,       // "cat", "cat|cuisine", "cat|cuisine|sub"
    pub unmet: Vec<UnmetRequirement>,
    pub over_fulfilled: BTreeMap<String, OverFulfillment>,
}

/// Scored package with its identity
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    pub variant_id: String,
    pub variant_name: String,
    pub price: f64,
    pub rating: f64,
    pub package_id: String,
    pub venue_id: String,
    pub score: MatchScore,
}

impl MatchRecord {
    /// Overall ratio as a percentage rounded to two decimals
    pub fn match_percentage(&self) -> f64 {
        round2(self.score.overall_ratio * 100.0)
    }

    /// Wire representation with percentages
    pub fn to_report(&self) -> PackageMatchReport {
        PackageMatchReport {
            variant_id: self.variant_id.clone(),
            variant_name: self.variant_name.clone(),
            overall_match: self.score.overall_ratio,
            match_percentage: self.match_percentage(),
            category_matches: self
                .score
                .level_ratios
                .iter()
                .map(|(key, ratio)| (key.clone(), round2(ratio * 100.0)))
                .collect(),
            unmet_requirements: self.score.unmet.clone(),
            over_100_categories: self
                .score
                .over_fulfilled
                .iter()
                .map(|(name, over)| {
                    (
                        name.clone(),
                        OverFulfillment {
                            percentage: round2(over.percentage),
                            ..over.clone()
                        },
                    )
                })
                .collect(),
            price: self.price,
            rating: self.rating,
            package_id: self.package_id.clone(),
            venue_id: self.venue_id.clone(),
        }
    }
}

/// Per-package output record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageMatchReport {
    pub variant_id: String,
    pub variant_name: String,
    pub overall_match: f64,
    pub match_percentage: f64,
    pub category_matches: BTreeMap<String, f64>,
    pub unmet_requirements: Vec<UnmetRequirement>,
    pub over_100_categories: BTreeMap<String, OverFulfillment>,
    pub price: f64,
    pub rating: f64,
    pub package_id: String,
    pub venue_id: String,
}

/// Best package for one venue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueBestMatch {
    pub venue_id: String,
    pub match_percentage: f64,
    pub best_variant_id: String,
    pub best_variant_name: String,
}

/// Popularity of one flat key across offerings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPopularity {
    pub item_id: String,
    pub item_name: String,
    pub category: String,
    pub cuisine: String,
    pub subcategory: String,
    pub variants_count: usize,
    pub popularity_percentage: f64,
    pub total_quantity_across_variants: u64,
    pub average_quantity_per_variant: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopularityReport {
    pub items: Vec<ItemPopularity>,
    pub total_variants: usize,
    pub skipped: Vec<String>, // one note per offering that could not be read
}

/// Response of a full matching pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub matches: Vec<PackageMatchReport>,
    pub venue_matches: Vec<VenueBestMatch>,
    pub total_variants: usize,
    pub matched_variants: usize,
}

impl MatchResponse {
    pub fn empty(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: Some(message.into()),
            matches: vec![],
            venue_matches: vec![],
            total_variants: 0,
            matched_variants: 0,
        }
    }
}

pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
