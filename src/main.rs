// src/main.rs
use anyhow::Result;
use clap::Parser;
use interview_coach::cli::{handle_command, Cli};
use interview_coach::config;
use interview_coach::ClientConfig;
use std::fs::OpenOptions;
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging first
    let log_path = config::log_path();
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true) // Clear file on startup
        .open(&log_path)
        .expect("Failed to open log file");

    let registry = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_writer(file)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(
            EnvFilter::from_default_env()
                .add_directive("trace".parse().expect("Invalid log directive")),
        );

    if cli.verbose {
        registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    } else {
        registry.init();
    }

    info!("Log file: {}", log_path.display());
    let config = ClientConfig::load(cli.api.as_deref());

    handle_command(cli, &config).await
}
