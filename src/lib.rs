//! Activity Scout: the activity detail record shared between the scraping
//! stage and the page renderer, plus a small pipeline that cleans batches
//! of scraped records.

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod sources;

pub use error::{ActivityError, ValidationIssue};
pub use models::{
    dedup_by_id, dedup_by_key, ActivityDetails, BreadCrumb, Image, Location, Price, Review,
    ReviewScale, SourceListing, ROOT_CRUMBS,
};
