use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Common trait for anything that hands over raw activity records.
/// Records are untyped; turning them into `ActivityDetails` is the pipeline's job.
#[async_trait]
pub trait ActivitySource: Send + Sync {
    /// Fetch raw records from the source, in source order
    async fn fetch(&self) -> Result<Vec<Value>>;

    /// Get the name of the source
    fn source_name(&self) -> &str;
}
