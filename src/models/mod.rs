mod construct;
mod listing;
mod location;
mod validate;

pub use listing::{SourceListing, ROOT_CRUMBS};
pub use validate::ReviewScale;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Image shown in the activity gallery
///
/// `description` and `alt` distinguish "not provided" (`None`, `null` on the
/// wire) from "provided but blank" (`Some("")`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
    pub width: u32,
    pub height: u32,
}

/// Pricing as displayed on the listing. Amounts are kept as formatted text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub market_price: String,
    pub selling_price: String,
    pub currency: String,
}

/// Where the activity takes place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub address: String,
    /// Opaque "lat,lon" text as provided by the source
    pub coordinates: String,
    pub image_url: String,
}

/// Aggregated review data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub count: u64,
    pub score: f64,
    pub description: String,
}

/// One step of the navigation trail, root first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreadCrumb {
    pub name: String,
    pub url: String,
}

/// Core activity data model used to render a detail page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDetails {
    pub id: u64,
    pub title: String,
    pub url: String,
    pub description: String,
    pub summary: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    pub price: Price,
    pub location: Location,
    pub review: Review,
    /// Pre-formatted participant count such as "10,000+"
    pub no_past_participants: String,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub breadcrumbs: Vec<BreadCrumb>,
}

impl ActivityDetails {
    /// Parse a record from JSON text, enforcing the same field contracts as
    /// [`ActivityDetails::from_value`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Remove items whose key repeats an earlier one, keeping the first
/// occurrence. Items without a key are always kept.
///
/// Returns the surviving items in their original order and the sorted,
/// de-duplicated list of keys that were dropped.
pub fn dedup_by_key<T>(items: Vec<T>, key: impl Fn(&T) -> Option<u64>) -> (Vec<T>, Vec<u64>) {
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(items.len());
    let mut duplicates = Vec::new();

    for item in items {
        match key(&item) {
            Some(id) if !seen.insert(id) => duplicates.push(id),
            _ => unique.push(item),
        }
    }

    duplicates.sort_unstable();
    duplicates.dedup();
    (unique, duplicates)
}

/// Remove records that repeat an earlier `id`, keeping the first occurrence.
pub fn dedup_by_id(records: Vec<ActivityDetails>) -> (Vec<ActivityDetails>, Vec<u64>) {
    dedup_by_key(records, |record| Some(record.id))
}
