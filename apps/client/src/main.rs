mod api;
mod browse;
mod config;
mod errors;
mod forms;
mod gateway;
mod models;
mod navigation;
mod notify;
mod query;
mod scoring;
mod session;
mod state;
#[cfg(test)]
mod test_support;
mod views;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::state::ClientState;
use crate::views::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Logs go to stderr so command output stays clean
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    debug!("Starting Vista client v{}", env!("CARGO_PKG_VERSION"));
    debug!("API at {}, storage at {}", config.api_url, config.storage_path.display());

    let state = ClientState::new(&config)?;

    let mut stdout = std::io::stdout();
    let outcome = views::run(cli.command, &state, &mut stdout).await?;
    views::print_toasts(&state.toasts, &mut stdout, &mut std::io::stderr())?;

    if let views::Outcome::Redirect(route) = &outcome {
        eprintln!("Redirected to {route}");
    }
    Ok(outcome.exit_code())
}
