use anyhow::Result;
use clap::{Parser, Subcommand};
use motorpool_common::config::TelemetryConfig;
use motorpool_common::telemetry;
use tracing::info;
use vendor_configuration::{application::SERVICE_NAME, config::Config, migration, server};

#[derive(Parser)]
#[command(name = "vendor-configuration", version, about = "Country reference data service")]
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
        "vendor_configuration=info,motorpool_common=info,tower_http=debug",
    )?;

    let config = Config::from_env()?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            info!("Starting Vendor Configuration service");
            info!("HTTP server listening on {}", config.http_addr());
            server::run(config, prometheus).await
        }
        Command::Migrate => migration::run_migrations(&config.database).await,
    }
}
