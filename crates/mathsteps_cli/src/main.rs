//! Mathsteps Control - CLI client for the problem resolution pipeline.
//!
//! Stands in for the web UI: submits a problem to the resolution chain and
//! prints the explanatory steps plus the final answer.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mathstepsctl")]
#[command(about = "Step-by-step math problem solver", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a math problem and print the solution steps
    Solve {
        /// The problem to solve (e.g. "2+3*4" or "solve x^2 + 2x - 3 = 0")
        problem: String,

        /// Print rendered HTML fragments instead of wire-format steps
        #[arg(long)]
        html: bool,
    },

    /// Show or change solver configuration
    Config {
        /// Save the Wolfram Alpha AppID to the user config file
        #[arg(long)]
        set_app_id: Option<String>,

        /// Show the current configuration
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Solve { problem, html } => commands::solve(&problem, html).await,
        Commands::Config { set_app_id, show } => commands::config(set_app_id, show),
    }
}
