//! hospital-bulk - bulk CSV ingestion service for the Hospital Directory API

#![allow(missing_docs)]

use clap::Parser;
use hospital_bulk::config::Config;
use hospital_bulk::server;
use hospital_bulk::utils::logging::{LogFormat, init_tracing};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

#[derive(Debug, Parser)]
#[command(name = "hospital-bulk", version, about = hospital_bulk::DESCRIPTION)]
struct Cli {
    /// YAML configuration file; environment variables override its values
    #[arg(short, long, env = "BULK_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind, overriding configuration
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, overriding configuration
    #[arg(short, long)]
    port: Option<u16>,

    /// Emit logs as JSON lines
    #[arg(long, env = "BULK_JSON_LOGS")]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let _ = dotenvy::dotenv();

    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Text
    };
    if let Err(e) = init_tracing(format) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let mut config = match Config::load(cli.config.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(host) = cli.host {
        config.service.server.host = host;
    }
    if let Some(port) = cli.port {
        config.service.server.port = port;
    }

    match server::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Display keeps multi-line bind errors readable
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
