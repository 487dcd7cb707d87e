//! CLI command definitions and handlers.

use anyhow::{Context, Result};
use chorechart_core::Config;
use chorechart_db::DbPool;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod chore;
pub mod claim;
pub mod serve;
pub mod tally;

/// Chorechart - household chore tracking
#[derive(Parser)]
#[command(name = "chorechart")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// SQLite database file (overrides the config file)
    #[arg(long, global = true, env = "CHORECHART_DB")]
    pub db: Option<PathBuf>,

    /// TOML config file
    #[arg(long, global = true, env = "CHORECHART_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve(serve::ServeArgs),

    /// Manage the chore catalog
    #[command(subcommand)]
    Chore(chore::ChoreCommands),

    /// Record and review claims
    #[command(subcommand)]
    Claim(claim::ClaimCommands),

    /// Show this week's leaderboard
    Tally(tally::TallyArgs),
}

impl Cli {
    /// Resolve the effective configuration: file, then flags.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_or_default(self.config.as_deref())?;
        if let Some(db) = &self.db {
            config.database.path = db.clone();
        }
        Ok(config)
    }

    pub async fn execute(self) -> Result<()> {
        let config = self.load_config()?;

        match self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Chore(cmd) => chore::execute(cmd, &config),
            Commands::Claim(cmd) => claim::execute(cmd, &config),
            Commands::Tally(args) => tally::execute(args, &config),
        }
    }
}

/// Open the configured database, creating it on first use.
pub fn open_pool(config: &Config) -> Result<DbPool> {
    let path = &config.database.path;
    tracing::debug!(path = %path.display(), "Opening database");
    chorechart_db::init_pool(path).with_context(|| format!("opening database {}", path.display()))
}
