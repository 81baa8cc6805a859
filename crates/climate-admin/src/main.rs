use std::env;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use climate_core::{db, summary};
use comfy_table::Table;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Climate dataset administrative tooling", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check the dataset schema and report row counts and date coverage
    Verify,
    /// Rank stations by measurement count, most active first
    StationActivity,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Verify => handle_verify().await,
        Command::StationActivity => handle_station_activity().await,
    }
}

async fn handle_verify() -> Result<()> {
    dotenvy::dotenv().ok();

    let database_url = env::var("DATABASE_URL")
        .or_else(|_| env::var("CLIMATE_DATABASE_URL"))
        .context("DATABASE_URL (or CLIMATE_DATABASE_URL) must be set")?;

    let pool = db::connect(&database_url).await?;
    db::verify_schema(&pool).await?;
    println!("Schema OK: measurement and station tables are present.");

    let summary = summary::dataset_summary(&pool).await?;
    println!("Stations:     {}", summary.station_count);
    println!("Measurements: {}", summary.measurement_count);
    match (&summary.first_date, &summary.last_date) {
        (Some(first), Some(last)) => println!("Observations span {first} to {last}."),
        _ => println!("No observations recorded."),
    }

    if let Some(latest) = summary::latest_measurement(&pool).await? {
        let prcp = latest
            .prcp
            .map_or_else(|| "none".to_string(), |value| value.to_string());
        println!(
            "Latest observation: station {} on {} (tobs {}, prcp {})",
            latest.station, latest.date, latest.tobs, prcp
        );
    }

    let stations = summary::stations(&pool).await?;
    let mut table = Table::new();
    table.set_header(vec!["id", "station", "name", "latitude", "longitude", "elevation"]);
    for station in stations {
        table.add_row(vec![
            station.id.to_string(),
            station.station,
            station.name,
            optional_cell(station.latitude),
            optional_cell(station.longitude),
            optional_cell(station.elevation),
        ]);
    }
    println!("{table}");

    Ok(())
}

async fn handle_station_activity() -> Result<()> {
    dotenvy::dotenv().ok();

    let database_url = env::var("DATABASE_URL")
        .or_else(|_| env::var("CLIMATE_DATABASE_URL"))
        .context("DATABASE_URL (or CLIMATE_DATABASE_URL) must be set")?;

    let pool = db::connect(&database_url).await?;
    db::verify_schema(&pool).await?;

    let ranking = summary::station_activity(&pool).await?;
    if ranking.is_empty() {
        println!("No measurements recorded.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["rank", "station", "name", "measurements"]);
    for (index, entry) in ranking.iter().enumerate() {
        table.add_row(vec![
            (index + 1).to_string(),
            entry.station.clone(),
            entry.name.clone(),
            entry.measurement_count.to_string(),
        ]);
    }
    println!("{table}");

    Ok(())
}

fn optional_cell(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |value| value.to_string())
}
