mod containers;
mod pick;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "pricelens")]
#[command(about = "Click-to-price-locator command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Simulate pointer activations against a saved page and submit the
    /// selected containers for extraction.
    Pick {
        /// Path to the saved HTML page.
        #[arg(long)]
        page: PathBuf,
        /// CSS selector of a click target; repeatable, activated in order.
        #[arg(long = "target", required = true)]
        targets: Vec<String>,
        /// Extractor service endpoint.
        #[arg(long, default_value = "http://127.0.0.1:3000/")]
        endpoint: String,
        /// Show what would be submitted without sending anything.
        #[arg(long)]
        dry_run: bool,
    },
    /// List the page's block containers.
    Containers {
        /// Path to the saved HTML page.
        #[arg(long)]
        page: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Pick {
            page,
            targets,
            endpoint,
            dry_run,
        } => pick::run_pick(&page, &targets, &endpoint, dry_run).await,
        Commands::Containers { page } => containers::run_containers(&page),
    }
}
