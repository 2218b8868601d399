//! Batch processing of scraped records: dedup, construct, validate, clean.

use crate::config::PipelineConfig;
use crate::models::{dedup_by_key, ActivityDetails, SourceListing};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info, warn};

/// A raw record that could not be turned into a valid activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rejection {
    /// Position in the input
    pub index: usize,
    /// The record's `id`, when it was readable
    pub id: Option<u64>,
    pub field: Option<String>,
    pub error: String,
}

/// Summary of one pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub total: usize,
    pub accepted: usize,
    pub rejected: Vec<Rejection>,
    pub duplicate_ids: Vec<u64>,
}

#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    pub activities: Vec<ActivityDetails>,
    pub report: RunReport,
}

impl ProcessOutcome {
    pub fn listings(&self) -> Vec<SourceListing> {
        self.activities.iter().map(SourceListing::from).collect()
    }
}

/// Drop raw records that repeat an earlier `id`, validity aside, so the
/// first occurrence in the input always wins. Records without a readable
/// `id` pass through and are rejected later by construction.
fn dedup_raw(raw: Vec<Value>) -> (Vec<(usize, Value)>, Vec<u64>) {
    dedup_by_key(raw.into_iter().enumerate().collect(), |(_, value): &(usize, Value)| {
        value.get("id").and_then(Value::as_u64)
    })
}

/// Drop repeated ids, then construct, validate, and clean the address of
/// every remaining raw record.
/// Invalid records are reported in `RunReport::rejected` and never abort the run.
pub fn process(source: &str, raw: Vec<Value>, config: &PipelineConfig) -> ProcessOutcome {
    let total = raw.len();
    let (kept, duplicate_ids) = dedup_raw(raw);
    if !duplicate_ids.is_empty() {
        warn!("Removed duplicate records for ids {:?}", duplicate_ids);
    }

    let mut activities = Vec::with_capacity(kept.len());
    let mut rejected = Vec::new();

    for (index, value) in kept {
        let built = ActivityDetails::from_value(&value)
            .and_then(|activity| activity.validate(&config.review_scale).map(|_| activity));

        match built {
            Ok(mut activity) => {
                let address = activity.location.cleaned_address(&config.default_city);
                if address != activity.location.address {
                    debug!(
                        "Cleaned address of {}: {:?} -> {:?}",
                        activity.id, activity.location.address, address
                    );
                    activity.location.address = address;
                }
                debug!("Accepted activity {}: {}", activity.id, activity.title);
                activities.push(activity);
            }
            Err(err) => {
                let id = value.get("id").and_then(Value::as_u64);
                warn!("Rejected record {} (id {:?}): {}", index, id, err);
                rejected.push(Rejection {
                    index,
                    id,
                    field: err.field().map(str::to_string),
                    error: err.to_string(),
                });
            }
        }
    }

    info!(
        "Processed {} records: {} accepted, {} rejected, {} duplicate ids",
        total,
        activities.len(),
        rejected.len(),
        duplicate_ids.len()
    );

    let report = RunReport {
        source: source.to_string(),
        generated_at: Utc::now(),
        total,
        accepted: activities.len(),
        rejected,
        duplicate_ids,
    };

    ProcessOutcome { activities, report }
}

async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Write the cleaned records, their listings, and the run report to
/// `config.output_dir`.
pub async fn write_outputs(outcome: &ProcessOutcome, config: &PipelineConfig) -> Result<()> {
    let dir = &config.output_dir;
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    write_json(&dir.join("activities.json"), &outcome.activities).await?;
    write_json(&dir.join("source_listings.json"), &outcome.listings()).await?;
    write_json(&dir.join("report.json"), &outcome.report).await?;
    info!("💾 Saved {} activities to {}", outcome.activities.len(), dir.display());

    if config.write_individual {
        let individual = dir.join("raw_activity");
        tokio::fs::create_dir_all(&individual).await?;

        for activity in &outcome.activities {
            write_json(&individual.join(format!("{}.json", activity.id)), activity).await?;
        }

        info!(
            "💾 Saved {} individual activity files to {}",
            outcome.activities.len(),
            individual.display()
        );
    }

    Ok(())
}
