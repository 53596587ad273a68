//! CLI module for the Legal Strategy Gateway
//!
//! Provides subcommands for:
//! - `serve`: HTTP API server
//! - `status`: probe every configured AI provider once
//! - `generate`: run a single strategy generation from the terminal

pub mod generate;
pub mod serve;
pub mod status;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging::init_logging;

/// Legal Strategy Gateway - AI strategy generation with provider failover
#[derive(Parser)]
#[command(name = "legal-strategy-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Probe each configured AI provider and print its availability
    Status,

    /// Generate a strategy for a single case description
    Generate(generate::GenerateArgs),
}

/// Load `.env` and the layered configuration, then install logging
pub(crate) fn load_config() -> AppConfig {
    dotenvy::dotenv().ok();

    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_logging(&config.logging);

    if let Some(e) = load_error {
        tracing::warn!(error = %e, "Failed to load configuration, using defaults");
    }

    config
}
