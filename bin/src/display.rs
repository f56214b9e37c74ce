//! Display utilities and output formatting for the chancay CLI.

use chancay_lib::prelude::*;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::Level;

/// Initializes logging based on the verbosity flag count.
pub(crate) fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Builds a progress bar for an archive pass, or a hidden one in quiet
/// mode.
pub(crate) fn archive_progress(total: u64, quiet: bool, message: &str) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}",
            )
            .expect("Invalid progress template")
            .progress_chars("=>-"),
    );
    pb.set_message(message.to_string());
    pb
}

/// Prints a short table of decoded bars.
pub(crate) fn print_bars(bars: &[Bar], head: usize) {
    println!(
        "{:<12} {:>9} {:>9} {:>9} {:>9} {:>12} {:>14}",
        "DATE", "OPEN", "HIGH", "LOW", "CLOSE", "VOLUME", "TURNOVER"
    );
    println!("{}", "-".repeat(80));

    if bars.len() <= head * 2 {
        for bar in bars {
            print_bar_row(bar);
        }
        return;
    }

    for bar in &bars[..head] {
        print_bar_row(bar);
    }
    println!("{:^80}", format!("... {} more bars ...", bars.len() - head * 2));
    for bar in &bars[bars.len() - head..] {
        print_bar_row(bar);
    }
}

fn print_bar_row(bar: &Bar) {
    println!(
        "{:<12} {:>9.2} {:>9.2} {:>9.2} {:>9.2} {:>12} {:>14.0}",
        bar.date.to_string(),
        bar.open,
        bar.high,
        bar.low,
        bar.close,
        bar.volume,
        bar.turnover
    );
}
