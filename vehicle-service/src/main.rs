use anyhow::Result;
use clap::{Parser, Subcommand};
use motorpool_common::config::{DatabaseConfig, TelemetryConfig};
use motorpool_common::telemetry;
use tracing::info;
use vehicle_service::{config::Config, migration, server, SERVICE_NAME};

#[derive(Parser)]
#[command(name = "vehicle-service", version, about = "Vehicle, brand and owner service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Create the database if needed and apply migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let prometheus = telemetry::init(
        &TelemetryConfig::from_env(SERVICE_NAME),
        "vehicle_service=info,motorpool_common=info,tower_http=debug",
    )?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let config = Config::from_env()?;
            info!("Starting Vehicle service");
            info!("HTTP server listening on {}", config.http_addr());
            server::run(config, prometheus).await
        }
        Command::Migrate => migration::run_migrations(&DatabaseConfig::from_env()?).await,
    }
}
