use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use card_normaliser_core::NormaliserConfig;
use card_normaliser_service::run_with_config;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "card-normaliser")]
#[command(about = "Rewrite card names to their canonical Scryfall spelling", long_about = None)]
struct Cli {
    /// Environment file loaded before configuration is read
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,
    /// Resolve names and report, without touching the database
    #[arg(long)]
    dry_run: bool,
}

/// Variables already set in the process win over the file. A missing file is
/// fine. Returns whether a file was loaded.
fn load_env_file(path: &Path) -> Result<bool> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(true),
        Err(e) if e.not_found() => Ok(false),
        Err(e) => Err(e).with_context(|| format!("failed to read {}", path.display())),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    // Before the subscriber, so RUST_LOG may come from the file.
    let loaded = load_env_file(&cli.env_file)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if loaded {
        tracing::debug!(path = %cli.env_file.display(), "Loaded environment file");
    } else {
        tracing::debug!(path = %cli.env_file.display(), "No environment file");
    }

    let config = NormaliserConfig::from_env()?.with_dry_run(cli.dry_run);
    tracing::info!(?config, "Starting card name normalisation");

    let report = run_with_config(&config).await?;
    println!("{report}");
    for name in &report.skipped_names {
        println!("  skipped: {name}");
    }

    Ok(())
}
