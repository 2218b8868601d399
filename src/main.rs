use activity_scout::config::PipelineConfig;
use activity_scout::pipeline;
use activity_scout::sources::{ActivitySource, JsonFileSource};
use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🎟️  Activity Scout - detail record cleaner");
    info!("==========================================");

    let config = PipelineConfig::from_env().context("Failed to load configuration")?;

    let source = JsonFileSource::new(config.input_path.clone());
    info!("Reading records from source '{}'", source.source_name());
    let raw = source.fetch().await?;

    let outcome = pipeline::process(source.source_name(), raw, &config);

    info!("\n✅ Accepted {} activities\n", outcome.activities.len());

    for (i, activity) in outcome.activities.iter().enumerate() {
        println!(
            "{}. {} ({} {})",
            i + 1,
            activity.title,
            activity.price.selling_price,
            activity.price.currency
        );
        println!(
            "   {:.1} ★ from {} reviews, {} participants",
            activity.review.score, activity.review.count, activity.no_past_participants
        );
        println!("   Location: {}", activity.location.address);
        println!("   ID: {}", activity.id);
        println!("   URL: {}", activity.url);
        println!();
    }

    for rejection in &outcome.report.rejected {
        println!("✗ record {}: {}", rejection.index, rejection.error);
    }

    pipeline::write_outputs(&outcome, &config).await?;

    Ok(())
}
