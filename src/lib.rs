//! Library surface for the stockgen CLI.
//!
//! The actual work lives in the member crates: `stockgen-core`
//! generates movement records deterministically from a seed, and
//! `stockgen-populate-sqlite` persists them into a SQLite store. This
//! crate re-exports both and keeps the date-parsing helper shared
//! between the binary and the integration tests.

use chrono::NaiveDate;

pub use stockgen_core;
pub use stockgen_populate_sqlite;

/// Parse an ISO `YYYY-MM-DD` date argument.
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("invalid date {value:?} (expected YYYY-MM-DD): {e}"))
}
