//! Normalization of upstream JSON documents into canonical menu trees
//!
//! Upstream payloads arrive in several shapes. Each document is classified
//! once into a [`MenuShape`] and then built into a [`MenuTree`]; nothing
//! downstream of this module looks at raw JSON.

use crate::cuisines::CuisineDirectory;
use crate::error::NormalizeError;
use crate::types::*;
use serde_json::{Map, Value};
use tracing::{debug, warn};

pub const DEFAULT_CATEGORY: &str = "Uncategorized";
pub const FLAT_CATEGORY: &str = "Menu Items";
pub const GENERAL: &str = "General";
pub const UNKNOWN_ITEM: &str = "Unknown";
pub const PLACEHOLDER_ITEM: &str = "Default";

/// Which quantity field a document carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountField {
    Requested, // customer requirements
    Available, // venue variants
}

impl CountField {
    pub fn key(self) -> &'static str {
        match self {
            CountField::Requested => "count",
            CountField::Available => "availableMenuCount",
        }
    }
}

/// Menu shapes accepted from upstream
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuShape<'a> {
    /// `[{ name, subcategoriesByCuisine | <count> }]`
    Sections(&'a [Value]),
    /// `{ item: qty }` with no category information
    FlatCounts(&'a Map<String, Value>),
    Unrecognized,
}

impl<'a> MenuShape<'a> {
    fn from_count_value(value: &'a Value) -> Self {
        match value {
            Value::Array(sections) => MenuShape::Sections(sections),
            Value::Object(counts) => MenuShape::FlatCounts(counts),
            _ => MenuShape::Unrecognized,
        }
    }

    /// Classify a requirement document
    pub fn detect_requirement(doc: &'a Value, field: CountField) -> Self {
        let obj = match doc {
            Value::Array(sections) => return MenuShape::Sections(sections),
            Value::Object(obj) => obj,
            _ => return MenuShape::Unrecognized,
        };
        let data = obj.get("data").and_then(Value::as_object);

        if let Some(Value::Array(sections)) = obj.get("menuSections") {
            return MenuShape::Sections(sections);
        }
        if let Some(Value::Array(sections)) = data.and_then(|d| d.get("menuSections")) {
            return MenuShape::Sections(sections);
        }
        if let Some(counts) = obj.get(field.key()) {
            return Self::from_count_value(counts);
        }
        if let Some(counts) = data.and_then(|d| d.get(field.key())) {
            return Self::from_count_value(counts);
        }
        if let Some(counts) = obj
            .get("variants")
            .and_then(Value::as_array)
            .and_then(|variants| variants.first())
            .and_then(|first| first.get(field.key()))
        {
            return Self::from_count_value(counts);
        }

        MenuShape::Unrecognized
    }
}

/// Count container: `{ item: qty }` or `[{ name, count }]`
#[derive(Debug, Clone, Copy)]
enum CountData<'a> {
    Keyed(&'a Map<String, Value>),
    Listed(&'a [Value]),
    Missing,
}

impl<'a> CountData<'a> {
    fn from_value(value: Option<&'a Value>) -> Self {
        match value {
            Some(Value::Object(map)) => CountData::Keyed(map),
            Some(Value::Array(list)) => CountData::Listed(list),
            _ => CountData::Missing,
        }
    }

    /// Items with a positive quantity
    fn positive_items(self) -> Vec<(&'a str, i64)> {
        let items: Vec<(&str, i64)> = match self {
            CountData::Keyed(map) => map
                .iter()
                .map(|(name, qty)| (name.as_str(), quantity(qty)))
                .collect(),
            CountData::Listed(list) => list
                .iter()
                .filter_map(Value::as_object)
                .map(|entry| {
                    let name = entry
                        .get("name")
                        .and_then(Value::as_str)
                        .unwrap_or(UNKNOWN_ITEM);
                    let qty = entry.get("count").map(quantity).unwrap_or(0);
                    (name, qty)
                })
                .collect(),
            CountData::Missing => vec![],
        };
        items.into_iter().filter(|(_, qty)| *qty > 0).collect()
    }
}

/// Largest quantity accepted from upstream; larger values are clamped
pub const MAX_QUANTITY: i64 = u32::MAX as i64;

/// Non-numeric and non-finite values count as zero; fractions truncate
pub fn quantity(value: &Value) -> i64 {
    let qty = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .unwrap_or(0),
        _ => 0,
    };
    qty.min(MAX_QUANTITY)
}

/// Build a canonical tree from a classified shape
pub fn build_menu(shape: MenuShape<'_>, field: CountField, directory: &CuisineDirectory) -> MenuTree {
    let mut tree = MenuTree::new();

    match shape {
        MenuShape::Sections(sections) => {
            for section in sections.iter().filter_map(Value::as_object) {
                add_section(&mut tree, section, field, directory);
            }
        }
        MenuShape::FlatCounts(counts) => {
            for (item, qty) in CountData::Keyed(counts).positive_items() {
                tree.insert_item(FLAT_CATEGORY, GENERAL, GENERAL, item, qty);
            }
        }
        MenuShape::Unrecognized => {}
    }

    tree
}

fn section_counts<'a>(obj: &'a Map<String, Value>, field: CountField) -> CountData<'a> {
    CountData::from_value(obj.get(field.key()).or_else(|| obj.get("count")))
}

fn add_section(
    tree: &mut MenuTree,
    section: &Map<String, Value>,
    field: CountField,
    directory: &CuisineDirectory,
) {
    let cat_name = section
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_CATEGORY);

    if let Some(by_cuisine) = section.get("subcategoriesByCuisine").and_then(Value::as_object) {
        for (cuisine_key, subcategories) in by_cuisine {
            let cuisine_name = directory.resolve(cuisine_key);
            let Some(subcategories) = subcategories.as_array() else {
                debug!("Ignoring non-list subcategories for {}/{}", cat_name, cuisine_key);
                continue;
            };
            for subcategory in subcategories.iter().filter_map(Value::as_object) {
                let subcat_name = subcategory
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or(GENERAL);
                for (item, qty) in section_counts(subcategory, field).positive_items() {
                    tree.insert_item(cat_name, cuisine_name, subcat_name, item, qty);
                }
            }
        }
        return;
    }

    for (item, qty) in section_counts(section, field).positive_items() {
        tree.insert_item(cat_name, GENERAL, GENERAL, item, qty);
    }
}

/// Requirement document -> canonical tree (empty when nothing is recognized)
pub fn requirements_to_tree(doc: &Value, directory: &CuisineDirectory) -> RequirementTree {
    let shape = MenuShape::detect_requirement(doc, CountField::Requested);
    if shape == MenuShape::Unrecognized {
        warn!("Could not find menuSections or count in requirement document");
    }
    build_menu(shape, CountField::Requested, directory)
}

/// Variant list from a `{ variants: [...] }` response or a bare array
pub fn variants_in(response: &Value) -> &[Value] {
    match response {
        Value::Array(list) => list,
        Value::Object(obj) => obj
            .get("variants")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]),
        _ => &[],
    }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn number_field(obj: &Map<String, Value>, key: &str) -> f64 {
    match obj.get(key) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Mongoose documents sometimes arrive wrapped in a `_doc` envelope
fn unwrap_document(raw: &Value) -> &Value {
    match raw.get("_doc") {
        Some(inner @ Value::Object(_)) => inner,
        _ => raw,
    }
}

fn variant_identity(obj: &Map<String, Value>) -> PackageOffering {
    PackageOffering {
        id: string_field(obj, "_id"),
        name: string_field(obj, "name"),
        price: number_field(obj, "cost"),
        rating: number_field(obj, "rating"),
        package_id: string_field(obj, "packageId"),
        venue_id: string_field(obj, "venueId"),
        menu: MenuTree::new(),
    }
}

fn empty_menu(offering: &PackageOffering) -> NormalizeError {
    let label = if offering.name.is_empty() {
        offering.id.clone()
    } else {
        offering.name.clone()
    };
    NormalizeError::EmptyMenu { variant: label }
}

/// One upstream variant -> canonical offering, with no placeholder fallback.
///
/// Fails with `EmptyMenu` whenever the variant lists no positive items.
pub fn variant_menu(
    raw: &Value,
    directory: &CuisineDirectory,
) -> Result<PackageOffering, NormalizeError> {
    let obj = unwrap_document(raw)
        .as_object()
        .ok_or(NormalizeError::NotAnObject)?;

    let mut offering = variant_identity(obj);
    let shape = obj
        .get(CountField::Available.key())
        .map(MenuShape::from_count_value)
        .unwrap_or(MenuShape::Unrecognized);
    offering.menu = build_menu(shape, CountField::Available, directory);

    if offering.menu.is_empty() {
        return Err(empty_menu(&offering));
    }
    Ok(offering)
}

/// One upstream variant -> canonical offering for ranking.
///
/// A menu-less variant that still has an id and a name gets the placeholder
/// item `Menu Items|General|General|Default = 1`.
pub fn variant_to_offering(
    raw: &Value,
    directory: &CuisineDirectory,
) -> Result<PackageOffering, NormalizeError> {
    let obj = unwrap_document(raw)
        .as_object()
        .ok_or(NormalizeError::NotAnObject)?;

    match variant_menu(raw, directory) {
        Err(NormalizeError::EmptyMenu { .. }) => {
            let mut offering = variant_identity(obj);
            if offering.id.is_empty() || offering.name.is_empty() {
                return Err(empty_menu(&offering));
            }
            warn!("No menu items found for variant '{}', using placeholder item", offering.name);
            offering
                .menu
                .insert_item(FLAT_CATEGORY, GENERAL, GENERAL, PLACEHOLDER_ITEM, 1);
            Ok(offering)
        }
        other => other,
    }
}

/// Offerings from a batch plus one note per skipped variant
#[derive(Debug, Default)]
pub struct NormalizedBatch {
    pub offerings: Vec<PackageOffering>,
    pub skipped: Vec<String>,
}

pub fn normalize_variants(response: &Value, directory: &CuisineDirectory) -> NormalizedBatch {
    let variants = variants_in(response);
    let mut batch = NormalizedBatch::default();

    for (idx, raw) in variants.iter().enumerate() {
        match variant_to_offering(raw, directory) {
            Ok(offering) => batch.offerings.push(offering),
            Err(e) => {
                warn!("Skipping variant #{}: {}", idx, e);
                batch.skipped.push(format!("variant #{}: {}", idx, e));
            }
        }
    }

    debug!(
        "Normalized {} of {} variants",
        batch.offerings.len(),
        variants.len()
    );
    batch
}
