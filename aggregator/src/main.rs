//! Main entry point for the catalogs binary
//!
//! Replays a scripted scenario into in-memory collaborators and prints every
//! ordered catalog list the aggregator emits, one JSON line per emission.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use futures_util::StreamExt;

use aggregator::{
    AggregatorError, AggregatorResult, CatalogAggregator, InMemoryCatalogRepository,
    InMemoryLibraryRepository, Scenario,
};
use shared::{logging, CatalogSort};

/// Observe a merged, ranked catalog list while replaying source updates
#[derive(Parser)]
#[command(name = "catalogs")]
#[command(about = "Merges live catalog sources and prints each ordered snapshot")]
pub struct Args {
    /// Scenario file describing the source updates to replay
    #[arg(long)]
    pub scenario: PathBuf,

    /// Sort policy (name, favorites)
    #[arg(long, default_value = "name")]
    pub sort: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Delay between replayed steps in milliseconds
    #[arg(long, default_value = "0")]
    pub step_delay_ms: u64,
}

#[tokio::main]
async fn main() -> AggregatorResult<()> {
    let args = Args::parse();

    logging::init_tracing_with_level(Some(&args.log_level));

    let sort: CatalogSort = args.sort.parse().map_err(|_| AggregatorError::InvalidSort {
        value: args.sort.clone(),
    })?;
    let scenario = Scenario::load(&args.scenario)?;

    logging::log_startup(&format!(
        "catalog aggregation ({} steps, sorted by {})",
        scenario.steps.len(),
        sort
    ));

    let catalogs = InMemoryCatalogRepository::new();
    let library = InMemoryLibraryRepository::new();
    let pipeline = CatalogAggregator::new(catalogs.clone(), library.clone());

    // Subscribe before replaying so no snapshot is missed
    let mut ordered = pipeline.observe(sort);

    let step_delay = Duration::from_millis(args.step_delay_ms);
    let replay = tokio::spawn(async move {
        scenario.play(&catalogs, &library, step_delay).await;
    });

    let mut emitted = 0usize;
    let mut outcome = Ok(());
    while let Some(snapshot) = ordered.next().await {
        match snapshot {
            Ok(catalogs) => {
                emitted += 1;
                println!("{}", serde_json::to_string(&catalogs)?);
            }
            Err(error) => {
                logging::log_error("Catalog observation", &error);
                outcome = Err(error);
                break;
            }
        }
    }
    drop(ordered);

    replay.await.map_err(|e| AggregatorError::TaskFailed {
        message: e.to_string(),
    })?;

    match outcome {
        Ok(()) => {
            logging::log_success(&format!("Replay finished after {emitted} emissions"));
            Ok(())
        }
        Err(error) => {
            logging::log_shutdown("upstream source failed");
            Err(error)
        }
    }
}
