// SPDX-FileCopyrightText: 2026 Aivy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Aivy - conversational lead-engagement agent for the FabriiQ site.
//!
//! This is the binary entry point for the Aivy core. The chat surface
//! (web widget and HTTP routes) connects to the library crates; this
//! binary provides operational commands.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Aivy - conversational lead-engagement agent.
#[derive(Parser, Debug)]
#[command(name = "aivy", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Aivy agent server.
    Serve,
    /// Initialize the database and run pending migrations.
    Migrate,
    /// Print the resolved configuration.
    Config,
}

#[tokio::main]
async fn main() {
    // Load and validate configuration at startup.
    let config = match aivy_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            for error in &errors {
                eprintln!("aivy: {error}");
            }
            std::process::exit(1);
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.agent.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(agent_name = config.agent.name.as_str(), "config loaded");

    match Cli::parse().command {
        Some(Commands::Serve) => {
            println!("aivy serve: not yet implemented");
        }
        Some(Commands::Migrate) => match aivy_storage::Database::open(
            &config.storage.database_path,
        )
        .await
        {
            Ok(db) => {
                if let Err(e) = db.close().await {
                    eprintln!("aivy migrate: {e}");
                    std::process::exit(1);
                }
                println!("aivy migrate: schema up to date at {}", config.storage.database_path);
            }
            Err(e) => {
                eprintln!("aivy migrate: {e}");
                std::process::exit(1);
            }
        },
        Some(Commands::Config) => {
            println!("agent.name = {}", config.agent.name);
            println!("storage.database_path = {}", config.storage.database_path);
            println!(
                "retrieval.similarity_threshold = {}",
                config.retrieval.similarity_threshold
            );
            println!(
                "retrieval.fallback_threshold = {}",
                config.retrieval.fallback_threshold
            );
            println!("retrieval.max_results = {}", config.retrieval.max_results);
            println!("memory.history_limit = {}", config.memory.history_limit);
        }
        None => {
            println!("aivy: use --help for available commands");
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn binary_loads_config_defaults() {
        // Verify config loads with defaults (no config file needed)
        let config = aivy_config::load_and_validate().expect("default config should be valid");
        assert_eq!(config.agent.name, "aivy");
    }
}
