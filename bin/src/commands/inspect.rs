//! Inspect command implementation.

use std::path::Path;

use anyhow::{Result, bail};
use chancay_lib::prelude::*;
use chancay_lib::record_count;

use crate::display;

/// Decodes one symbol's day file and prints its bars and quality report.
pub(crate) fn inspect(source: &Path, query: &str, head: usize, strict: bool) -> Result<()> {
    let mut archive = DayArchive::open(source)?;

    for entry in archive.files()? {
        let file = entry?;
        let classification = classify_day_file(&file.name);
        let matches =
            file.name == query || classification.symbol().is_some_and(|s| s == query);
        if !matches {
            continue;
        }

        let Some(symbol) = classification.symbol() else {
            bail!("{} is not an equity day file", file.name);
        };

        let bars = decode_day_file(symbol, &file.data);
        let mode = if strict {
            ValidationMode::Strict
        } else {
            ValidationMode::Lenient
        };
        let report = validate(symbol, &bars, mode)?;

        println!("File: {} ({} bytes)", file.name, file.data.len());
        println!("Symbol: {symbol}");
        println!(
            "Records: {} complete, {} decoded",
            record_count(file.data.len()),
            bars.len()
        );
        if let (Some(first), Some(last)) = (bars.first(), bars.last()) {
            println!("Range: {} to {}", first.date, last.date);
        }

        if let Some(failure) = &report.hard_failure {
            println!("Quality: FAILED ({failure})");
        } else if report.soft_issue_count() > 0 || report.zero_volume > 0 {
            println!(
                "Quality: passed with soft issues (close<=0: {}, high<low: {}, close out of range: {}, zero volume: {})",
                report.non_positive_close,
                report.high_below_low,
                report.close_out_of_range,
                report.zero_volume
            );
        } else {
            println!("Quality: passed");
        }

        if !bars.is_empty() {
            println!();
            display::print_bars(&bars, head);
        }

        return Ok(());
    }

    bail!("No day file matching {query} in {}", source.display());
}
