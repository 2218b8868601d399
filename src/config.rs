//! Pipeline configuration loaded from environment variables.

use crate::models::ReviewScale;
use std::env;
use std::path::PathBuf;

/// Settings for one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Scraped records to read
    pub input_path: PathBuf,
    /// Directory receiving the cleaned output files
    pub output_dir: PathBuf,
    /// Accepted range for review scores
    pub review_scale: ReviewScale,
    /// Also write one JSON file per accepted record
    pub write_individual: bool,
    /// Address used when a record's address is blank or only coordinates
    pub default_city: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("scraped_activity_data.json"),
            output_dir: PathBuf::from("output"),
            review_scale: ReviewScale::default(),
            write_individual: true,
            default_city: "Hong Kong".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Load from `ACTIVITY_*` environment variables, reading `.env` if present.
    /// Unset variables fall back to the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let review_scale = ReviewScale {
            min: parse_f64(&lookup, "ACTIVITY_SCORE_MIN")?.unwrap_or(defaults.review_scale.min),
            max: parse_f64(&lookup, "ACTIVITY_SCORE_MAX")?.unwrap_or(defaults.review_scale.max),
        };
        if review_scale.min > review_scale.max {
            return Err(ConfigError::Invalid(
                "ACTIVITY_SCORE_MIN",
                format!("{} is above ACTIVITY_SCORE_MAX", review_scale.min),
            ));
        }

        Ok(Self {
            input_path: lookup("ACTIVITY_INPUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.input_path),
            output_dir: lookup("ACTIVITY_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            review_scale,
            write_individual: parse_bool(&lookup, "ACTIVITY_WRITE_INDIVIDUAL")?
                .unwrap_or(defaults.write_individual),
            default_city: lookup("ACTIVITY_DEFAULT_CITY")
                .filter(|city| !city.trim().is_empty())
                .unwrap_or(defaults.default_city),
        })
    }
}

fn parse_f64(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<f64>, ConfigError> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Some(v)),
            _ => Err(ConfigError::Invalid(key, raw)),
        },
    }
}

fn parse_bool(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<bool>, ConfigError> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(Some(true)),
            "0" | "false" | "no" => Ok(Some(false)),
            _ => Err(ConfigError::Invalid(key, raw)),
        },
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
