use super::ActivityDetails;
use serde::{Deserialize, Serialize};

/// Flattened view of an activity in the `source_*` vocabulary used by the
/// enrichment stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceListing {
    pub source_url: String,
    pub source_name: String,
    pub source_address: String,
    #[serde(rename = "source_pricePoint")]
    pub source_price_point: Option<String>,
    #[serde(rename = "source_savedCount")]
    pub source_saved_count: String,
    pub source_rating: f64,
    pub source_introduction: String,
    #[serde(rename = "source_photoUrls")]
    pub source_photo_urls: Vec<String>,
    /// Breadcrumb names below the site root, comma separated
    #[serde(rename = "source_Categories")]
    pub source_categories: String,
}

/// Breadcrumb names that label the site root rather than a category
pub const ROOT_CRUMBS: &[&str] = &["Klook Travel", "Hong Kong"];

/// "$N" with N rounded to the nearest 10, for selling prices given as a bare
/// decimal number. Formatted amounts like "HK$1,200" are left alone.
fn price_point(selling_price: &str) -> Option<String> {
    let text = selling_price.trim();
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }

    let amount: f64 = text.parse().ok()?;
    let rounded = (amount / 10.0).round_ties_even() * 10.0;
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range
    if !rounded.is_finite() || rounded >= i64::MAX as f64 {
        return None;
    }
    Some(format!("${}", rounded as i64))
}

impl SourceListing {
    /// Project an activity, treating crumbs named in `root_crumbs` as site
    /// navigation rather than categories.
    pub fn with_root_crumbs(activity: &ActivityDetails, root_crumbs: &[&str]) -> Self {
        let categories = activity
            .breadcrumbs
            .iter()
            .map(|crumb| crumb.name.as_str())
            .filter(|name| !name.is_empty() && !root_crumbs.contains(name))
            .collect::<Vec<_>>()
            .join(",");

        Self {
            source_url: activity.url.clone(),
            source_name: activity.title.clone(),
            source_address: activity.location.address.clone(),
            source_price_point: price_point(&activity.price.selling_price),
            source_saved_count: activity.no_past_participants.clone(),
            source_rating: activity.review.score,
            source_introduction: activity.summary.clone(),
            source_photo_urls: activity
                .images
                .iter()
                .filter(|image| image.url.starts_with("http"))
                .map(|image| image.url.clone())
                .collect(),
            source_categories: categories,
        }
    }
}

impl From<&ActivityDetails> for SourceListing {
    fn from(activity: &ActivityDetails) -> Self {
        Self::with_root_crumbs(activity, ROOT_CRUMBS)
    }
}
