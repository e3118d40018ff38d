mod commands;
mod formatting;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;

#[derive(Parser)]
#[command(name = "monopack")]
#[command(about = "Dependency-ordered packaging helper for npm-style monorepos")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding sub-packages (defaults to monopack.toml, then ./packages)
    #[arg(long, global = true)]
    packages_dir: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[arg(short, long, action, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the sub-packages found in the packages directory
    Scan {
        #[arg(long, action)]
        json: bool,
    },
    /// Print the dependency-consistent build/publish order
    Order {
        /// Manifests to order; the packages directory is scanned when omitted
        manifests: Vec<PathBuf>,
        #[arg(long)]
        retry_budget: Option<u32>,
        #[arg(long, action)]
        json: bool,
    },
    /// Copy shared dev dependencies from a parent manifest into a project
    SyncDevDeps {
        /// Manifest declaring the shared dev dependencies
        #[arg(long)]
        source: PathBuf,
        /// Project manifest; defaults to the nearest package.json
        #[arg(long)]
        target: Option<PathBuf>,
        #[arg(long, action)]
        dry_run: bool,
        #[arg(long, action)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        Level::ERROR
    } else {
        match cli.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    let workspace = commands::Workspace::load(cli.packages_dir)?;

    match cli.command {
        Commands::Scan { json } => commands::cmd_scan(&workspace, json)?,
        Commands::Order {
            manifests,
            retry_budget,
            json,
        } => commands::cmd_order(&workspace, manifests, retry_budget, json)?,
        Commands::SyncDevDeps {
            source,
            target,
            dry_run,
            json,
        } => commands::cmd_sync_dev_deps(&workspace, source, target, dry_run, json)?,
    }

    Ok(())
}
