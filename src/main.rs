use std::sync::Arc;

use anyhow::{Context, Result};
use gradtage::{
    DegreeDayEngine, GradtageConfig, HttpJsonFetcher, OpenMeteoArchive, RecordingDiagnostics,
    logging,
};

const DEFAULT_START: &str = "2022-10-01";
const DEFAULT_END: &str = "2023-04-30";

#[tokio::main]
async fn main() -> Result<()> {
    let config = GradtageConfig::load().context("Failed to load configuration")?;
    logging::init(&config.logging)?;

    // Optional positional period: gradtage [START END]
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (start_date, end_date) = match args.as_slice() {
        [] => (DEFAULT_START.to_string(), DEFAULT_END.to_string()),
        [start, end] => (start.clone(), end.clone()),
        _ => anyhow::bail!("Usage: gradtage [START_DATE END_DATE] (dates as YYYY-MM-DD)"),
    };

    let fetcher = HttpJsonFetcher::from_config(&config.archive)?;
    let source = OpenMeteoArchive::from_config(fetcher, &config.archive);
    let diagnostics = Arc::new(RecordingDiagnostics::new());
    let engine = DegreeDayEngine::with_diagnostics(source, diagnostics.clone())
        .with_max_concurrent_fetches(config.calculation.max_concurrent_fetches);

    let results = engine
        .calculate_for_cities(
            &config.locations,
            &start_date,
            &end_date,
            config.calculation.room_temperature,
            config.calculation.heating_limit,
        )
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    println!("{}", engine.get_calculation_summary(&results));

    let missing = results.missing_locations(&config.locations);
    if !missing.is_empty() {
        println!();
        println!("Ohne Ergebnis:");
        for failure in diagnostics.failures() {
            println!("  {:20} {}", failure.location_name, failure.message);
        }
    }

    Ok(())
}
