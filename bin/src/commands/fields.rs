//! Fields command implementation.

use anyhow::Result;
use chancay_lib::StatementField;
use chancay_lib::fields::source_column;

/// Prints the statement field mapping: source column and store name.
pub(crate) fn show_fields() -> Result<()> {
    println!("{:<24} {:>8}  {}", "FIELD", "COLUMN", "STORE NAME");
    println!("{}", "-".repeat(56));

    for field in StatementField::ALL {
        println!("{:<24} {:>8}  {}", format!("{field:?}"), source_column(field), field.name());
    }

    println!("\nTotal: {} fields", StatementField::ALL.len());
    Ok(())
}
