//! Source column layout for quarterly statement rows.
//!
//! A source row is a flat array of numeric columns. Column 0 is the
//! reporting period end as `YYYYMMDD`; the announcement date sits at
//! column 314 as `YYMMDD` with a two-digit year. Everything else we
//! extract is mapped here, one entry per [`StatementField`], so adding
//! a field without mapping its column refuses to compile.

use chancay_types::{StatementField, StatementRow};
use chrono::NaiveDate;

/// Column holding the reporting period end (`YYYYMMDD`).
pub const REPORT_DATE_COLUMN: usize = 0;

/// Column holding the announcement date (`YYMMDD`).
pub const PUBL_DATE_COLUMN: usize = 314;

/// Maps a statement field to its source column index.
#[must_use]
pub const fn source_column(field: StatementField) -> usize {
    match field {
        StatementField::BasicEps => 1,
        StatementField::EpsDeducted => 2,
        StatementField::NavPs => 4,
        StatementField::CapitalReservePs => 5,
        StatementField::Roe => 6,
        StatementField::OperatingCashFlowPs => 7,
        StatementField::TotalAssets => 40,
        StatementField::TotalLiabilities => 63,
        StatementField::TotalEquity => 72,
        StatementField::OperatingRevenue => 74,
        StatementField::OperatingCost => 75,
        StatementField::OperatingProfit => 86,
        StatementField::TotalProfit => 92,
        StatementField::NetProfit => 95,
        StatementField::NetProfitParent => 96,
        StatementField::OperatingCashFlowNet => 107,
        StatementField::TotalShares => 238,
    }
}

/// Parses an eight-digit `YYYYMMDD` column value into a date.
#[must_use]
pub fn parse_report_date(value: f64) -> Option<NaiveDate> {
    if !value.is_finite() || value <= 0.0 {
        return None;
    }

    let packed = value as u32;
    let year = (packed / 10_000) as i32;
    let month = (packed / 100) % 100;
    let day = packed % 100;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parses a six-digit `YYMMDD` column value into a date.
///
/// Two-digit years use a fixed century window: years below 50 are
/// 20xx, the rest are 19xx.
#[must_use]
pub fn parse_publ_date(value: f64) -> Option<NaiveDate> {
    if !value.is_finite() || value <= 0.0 {
        return None;
    }

    let packed = value as u32;
    let yy = (packed / 10_000) % 100;
    let century = if yy < 50 { 2000 } else { 1900 };
    let year = (century + yy) as i32;
    let month = (packed / 100) % 100;
    let day = packed % 100;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Converts one source row into a statement row for a symbol.
///
/// Returns `None` when the report date column is missing or not a
/// calendar date. Zero-valued columns are treated as source nulls and
/// omitted, matching the source's convention of zero-filling absent
/// figures.
#[must_use]
pub fn row_to_statement(symbol: &str, columns: &[f64]) -> Option<StatementRow> {
    let period_end = columns
        .get(REPORT_DATE_COLUMN)
        .copied()
        .and_then(parse_report_date)?;

    let publ_date = columns
        .get(PUBL_DATE_COLUMN)
        .copied()
        .and_then(parse_publ_date);

    let mut values = Vec::new();
    for field in StatementField::ALL {
        let Some(&value) = columns.get(source_column(field)) else {
            continue;
        };
        if value != 0.0 && value.is_finite() {
            values.push((field, value));
        }
    }

    Some(StatementRow {
        symbol: symbol.to_string(),
        period_end,
        publ_date,
        values,
    })
}
