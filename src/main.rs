use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::{error, info};

use run_tracker::config::Config;
use run_tracker::domain::Dataset;
use run_tracker::infra::csv_source;
use run_tracker::logging;
use run_tracker::metrics;
use run_tracker::pipeline::{Pipeline, PipelineFailure, PipelineOutcome};
use run_tracker::store::DatasetStore;

#[derive(Parser)]
#[command(name = "run_tracker")]
#[command(about = "Running log CSV ingestion and metrics")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and normalize a CSV of running records
    Ingest {
        /// Path to the CSV file
        #[arg(long)]
        file: PathBuf,
    },
    /// Ingest a CSV and print the derived metrics
    Report {
        /// Path to the CSV file
        #[arg(long)]
        file: PathBuf,
        /// Focus the report on a single person, including their trend series
        #[arg(long)]
        person: Option<String>,
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
}

async fn run_pipeline(file: &Path) -> anyhow::Result<PipelineOutcome> {
    let table = csv_source::read_table(file)?;
    let config = Config::load_or_default();
    let pipeline = Pipeline::new(config.pipeline);

    // The pipeline itself is synchronous; run it off the async edge as one
    // opaque call that delivers a single terminal outcome
    let outcome = tokio::task::spawn_blocking(move || pipeline.run(&table)).await?;
    Ok(outcome)
}

/// Unwraps a successful outcome, printing the soft-limit or failure message
/// and exiting otherwise.
fn expect_dataset(outcome: PipelineOutcome) -> Dataset {
    match outcome {
        PipelineOutcome::Succeeded(dataset) => dataset,
        PipelineOutcome::RowLimitExceeded { row_count } => {
            println!(
                "⚠️  The file contains {} rows, which exceeds the 10,000 row limit.",
                row_count
            );
            println!("   Please select a different CSV file with fewer rows.");
            std::process::exit(2);
        }
        PipelineOutcome::Failed(failure) => {
            match &failure {
                PipelineFailure::Row(rejection) => {
                    error!("Upload failed at row {}: {}", rejection.row(), rejection)
                }
                other => error!("Upload failed: {}", other),
            }
            println!("❌ {}", failure);
            std::process::exit(1);
        }
    }
}

fn print_ingest_summary(dataset: &Dataset) {
    let people = dataset.person_names();
    println!("✅ File is parsed");
    println!("   Total runs: {} (normalized)", dataset.records.len());
    println!("   People: {} ({})", people.len(), people.join(", "));
}

fn print_report(dataset: &Dataset, person: Option<&str>, as_json: bool) {
    let records = &dataset.records;
    let overall = metrics::overall_metrics(records);
    let averages = metrics::average_per_person(records);
    let totals = metrics::total_per_person(records);

    if as_json {
        let mut report = json!({
            "overall": overall,
            "average_per_person": averages,
            "total_per_person": totals,
        });
        if let Some(person) = person {
            report["person"] = json!({
                "name": person,
                "metrics": metrics::person_metrics(records, person),
                "trend": metrics::person_trend(records, person),
            });
        }
        println!("{}", serde_json::to_string_pretty(&report).unwrap_or_default());
        return;
    }

    println!("📊 Overall");
    println!("   Total runs: {}", overall.total_records);
    println!("   People: {}", overall.distinct_people);
    println!("   Total miles: {}", overall.total_distance);

    println!("🏅 Average miles per person");
    for entry in &averages {
        println!("   {}: {}", entry.person, entry.average);
    }

    println!("🏅 Total miles per person");
    for entry in &totals {
        println!("   {}: {}", entry.person, entry.total);
    }

    if let Some(person) = person {
        let person_metrics = metrics::person_metrics(records, person);
        println!("🏃 {}", person);
        println!("   Runs: {}", person_metrics.record_count);
        println!("   Total miles: {}", person_metrics.total_distance);
        println!("   Average miles: {}", person_metrics.average_distance);
        for point in metrics::person_trend(records, person) {
            println!("   {} {}", point.date, point.distance);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    logging::init_logging();

    let cli = Cli::parse();
    let store = DatasetStore::new();

    match cli.command {
        Commands::Ingest { file } => {
            println!("🔄 Ingesting {}...", file.display());
            let outcome = run_pipeline(&file).await?;
            let dataset = expect_dataset(outcome);

            let published = store.publish(dataset);
            info!("Ingest finished for session {}", published.session_id);
            print_ingest_summary(&published.dataset);
        }
        Commands::Report { file, person, json } => {
            let outcome = run_pipeline(&file).await?;
            let dataset = expect_dataset(outcome);

            let published = store.publish(dataset);
            print_report(&published.dataset, person.as_deref(), json);
        }
    }

    Ok(())
}
