//! chancay CLI - Chinese market day-file inspection and ingestion.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod display;

#[derive(Parser)]
#[command(name = "chancay")]
#[command(about = "Chinese market day-file inspection and ingestion", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan an archive and summarize its day files
    Scan {
        /// Archive path (.zip) or extracted directory tree
        source: PathBuf,

        /// List every skipped (non-equity or unrecognized) entry
        #[arg(long)]
        show_skipped: bool,
    },

    /// Decode one symbol's day file and print its bars
    Inspect {
        /// Archive path (.zip) or extracted directory tree
        source: PathBuf,

        /// Canonical symbol (600000.SS) or raw file name (sh600000.day)
        symbol: String,

        /// Number of bars to print from each end
        #[arg(short = 'n', long, default_value = "5")]
        head: usize,

        /// Fail on hard quality violations instead of reporting them
        #[arg(long)]
        strict: bool,
    },

    /// Show the quarterly statement field mapping
    Fields,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    display::init_logging(cli.verbose);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Scan {
            source,
            show_skipped,
        } => commands::scan::scan(&source, show_skipped, cli.quiet),
        Commands::Inspect {
            source,
            symbol,
            head,
            strict,
        } => commands::inspect::inspect(&source, &symbol, head, strict),
        Commands::Fields => commands::fields::show_fields(),
    }
}
