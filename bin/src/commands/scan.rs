//! Scan command implementation.
//!
//! Enumerates an archive without touching any store and reports what an
//! import would see: equities per market, non-equity and unrecognized
//! entries, and the record volume involved.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use chancay_lib::prelude::*;
use chancay_lib::{parse_day_filename, record_count};

use crate::display;

/// Scans an archive and prints a classification summary.
pub(crate) fn scan(source: &Path, show_skipped: bool, quiet: bool) -> Result<()> {
    let mut archive = DayArchive::open(source)?;
    let total = archive.count()? as u64;
    let progress = display::archive_progress(total, quiet, "scanning");

    let mut equities_per_market: BTreeMap<&'static str, u64> = BTreeMap::new();
    let mut non_equity = 0u64;
    let mut unrecognized = 0u64;
    let mut unreadable = 0u64;
    let mut total_records = 0u64;
    let mut skipped_names: Vec<String> = Vec::new();

    for entry in archive.files()? {
        progress.inc(1);
        let file = match entry {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!(error = %e, "unreadable archive entry");
                unreadable += 1;
                continue;
            }
        };

        match classify_day_file(&file.name) {
            Classification::Equity(_) => {
                // Already matched the filename pattern, so the tag parses.
                if let Some((market, _)) = parse_day_filename(&file.name) {
                    *equities_per_market.entry(market.tag()).or_default() += 1;
                }
                total_records += record_count(file.data.len()) as u64;
            }
            Classification::NonEquity => {
                non_equity += 1;
                if show_skipped {
                    skipped_names.push(file.name);
                }
            }
            Classification::Unrecognized => {
                unrecognized += 1;
                if show_skipped {
                    skipped_names.push(file.name);
                }
            }
        }
    }
    progress.finish_and_clear();

    let equities: u64 = equities_per_market.values().sum();
    println!("Source: {}", source.display());
    println!("Day files: {total}");
    println!("Equities: {equities}");
    for market in Market::ALL {
        if let Some(count) = equities_per_market.get(market.tag()) {
            println!("  {}: {count}", market.tag());
        }
    }
    println!("Non-equity (indices, funds, bonds): {non_equity}");
    println!("Unrecognized: {unrecognized}");
    if unreadable > 0 {
        println!("Unreadable: {unreadable}");
    }
    println!("Daily records across equities: {total_records}");

    if show_skipped && !skipped_names.is_empty() {
        println!("\nSkipped entries:");
        for name in &skipped_names {
            println!("  {name}");
        }
    }

    Ok(())
}
