mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use mv_core::config::Config;
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG if set, otherwise pick defaults from the verbose flag.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "mediavault=trace,mv_server=trace,mv_db=debug,mv_core=debug,tower_http=debug".to_string()
        } else {
            "mediavault=info,mv_server=info,mv_db=info,mv_core=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Start {
            host,
            port,
            media_dir,
        } => {
            let mut config = Config::load_or_default(cli.config.as_deref());
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(dir) = media_dir {
                config.storage.media_dir = dir;
            }

            tracing::debug!(?config, "Effective configuration");

            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(mv_server::start(config))?;
            Ok(())
        }
        Commands::Validate { config } => validate_config(config.or(cli.config).as_deref()),
        Commands::Version => {
            println!("mediavault {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {}", p.display());
            let contents = std::fs::read_to_string(p)
                .with_context(|| format!("failed to read {}", p.display()))?;
            Config::from_json(&contents)?
        }
        None => {
            println!("No config file specified, using defaults");
            Config::default()
        }
    };

    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!("  Database: {}", config.server.db_path.display());
    println!("  Media directory: {}", config.storage.media_dir.display());
    println!("  Cache-Control: {}", config.storage.cache_control());

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("Configuration is valid");
    } else {
        for warning in &warnings {
            println!("  warning: {warning}");
        }
        println!("Configuration is valid with {} warning(s)", warnings.len());
    }

    Ok(())
}
