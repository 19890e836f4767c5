//! # Vistara Bill
//!
//! Command-line front end for the bill generator.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize Tracing                                                  │
//! │     • tracing-subscriber with env filter, written to stderr             │
//! │     • Default: info,vistara=debug, overridden with RUST_LOG             │
//! │                                                                         │
//! │  2. Parse Arguments (clap)                                              │
//! │                                                                         │
//! │  3. Load Config (file → VISTARA_* env → validate)                       │
//! │                                                                         │
//! │  4. Run Subcommand                                                      │
//! │     template │ validate │ preview │ export                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod commands;
mod config;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use config::CliConfig;

/// Generate Vistara Studios bills from a JSON form.
#[derive(Parser, Debug)]
#[command(name = "vistara-bill", version, about)]
struct Cli {
    /// Config file (defaults to vistara.toml in the platform config dir)
    #[arg(long, global = true, env = "VISTARA_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the starter form as JSON
    Template,

    /// Check a form and list every invalid field
    Validate {
        /// Bill form JSON file
        form: PathBuf,
    },

    /// Show the bill preview for a form
    Preview {
        /// Bill form JSON file
        form: PathBuf,

        /// Print the preview as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Render a form and save it as bill_preview.pdf
    Export {
        /// Bill form JSON file
        form: PathBuf,

        /// Output directory (overrides config)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    debug!(?cli, "Arguments parsed");

    let config = CliConfig::load(cli.config)?;

    match cli.command {
        Command::Template => commands::template()?,
        Command::Validate { form } => commands::validate(&form)?,
        Command::Preview { form, json } => commands::preview(&form, json)?,
        Command::Export { form, out } => {
            let out_dir = out.unwrap_or_else(|| config.output_dir.clone());
            let path = commands::export(&form, &config, &out_dir).await?;
            println!("{}", path.display());
        }
    }

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=vistara_export=trace` - Trace the export pipeline
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,vistara=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
