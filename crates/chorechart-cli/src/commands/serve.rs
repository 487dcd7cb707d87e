//! Web server command.

use anyhow::Result;
use chorechart_core::Config;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on (default from config, 3030)
    #[arg(long)]
    pub port: Option<u16>,

    /// Host to bind to (default from config, 127.0.0.1)
    #[arg(long)]
    pub host: Option<String>,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path (default: chorechart.log)
    #[arg(long, requires = "log")]
    pub log_file: Option<PathBuf>,
}

pub async fn execute(args: ServeArgs, mut config: Config) -> Result<()> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }

    let pool = Arc::new(super::open_pool(&config)?);
    let server = &config.server;

    println!();
    println!("  {} {}", "Chorechart".cyan().bold(), "Web Server".bold());
    println!();
    println!("  {}  http://{}:{}", "Chart".green(), server.host, server.port);
    println!(
        "  {}     {}",
        "Data".green(),
        config.database.path.display()
    );
    println!(
        "  {}   last {} days ({})",
        "Window".green(),
        config.tally.days,
        config.tally.boundary.as_str()
    );
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    chorechart_web::run_server(pool, config.tally, &server.host, server.port).await?;

    Ok(())
}
