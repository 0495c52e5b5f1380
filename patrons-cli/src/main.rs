//! Patrons — crowdfunding supporter roster sync CLI.
//!
//! # Usage
//!
//! ```text
//! patrons sync [--output <path>] [--config <file>] [--members-file <json>] [--dry-run] [--no-notify]
//! patrons diff [--output <path>] [--config <file>] [--members-file <json>]
//! patrons show [--config <file>] [--members-file <json>] [--json]
//! ```
//!
//! Reads `PATREON_ACCESS_TOKEN`, `PATREON_CAMPAIGN_ID`, `PATRONS_WEBHOOK_URL`
//! and `GITHUB_OUTPUT` from the environment.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{diff::DiffArgs, show::ShowArgs, sync::SyncArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "patrons",
    version,
    about = "Sync crowdfunding supporters into the addon's generated patron list",
    long_about = None,
)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch members, regenerate the patron file if the roster changed, and announce new supporters.
    Sync(SyncArgs),

    /// Show a unified diff of what sync would write.
    Diff(DiffArgs),

    /// Print the classified roster without touching the patron file.
    Show(ShowArgs),
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Logs go to stderr so stdout stays clean for command output.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Sync(args) => args.run(),
        Commands::Diff(args) => args.run(),
        Commands::Show(args) => args.run(),
    }
}
