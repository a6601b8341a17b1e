//! Helpers shared by the repository modules: SQLite parameter chunking and
//! the TEXT encodings used for decimals and dates.

use chrono::NaiveDate;
use log::error;
use navfolio_core::constants::DECIMAL_PRECISION;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::errors::StorageError;

/// Maximum number of bound parameters per statement.
///
/// SQLite builds compiled with the historical default reject statements with
/// more than 999 parameters; 500 leaves room for the rest of the query.
pub const SQLITE_MAX_PARAMS_CHUNK: usize = 500;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Splits `items` so that a multi-row insert of `columns` columns per row
/// stays under [`SQLITE_MAX_PARAMS_CHUNK`] parameters.
pub fn chunk_for_sqlite<T>(items: &[T], columns: usize) -> impl Iterator<Item = &[T]> {
    let rows = (SQLITE_MAX_PARAMS_CHUNK / columns.max(1)).max(1);
    items.chunks(rows)
}

/// Monetary values are stored as decimal TEXT rounded to 6 dp.
pub fn decimal_to_db(value: Decimal) -> String {
    value.round_dp(DECIMAL_PRECISION).normalize().to_string()
}

/// Full-scale decimal TEXT, for values that are carried forward and must
/// not lose precision (`nav`, `units`).
pub fn exact_decimal_to_db(value: Decimal) -> String {
    value.normalize().to_string()
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Lenient read for display-only columns: unparseable values are logged
/// and read as zero.
pub fn decimal_from_db(column: &str, raw: &str) -> Decimal {
    parse_decimal(raw).unwrap_or_else(|| {
        error!("Failed to parse {} '{}' as decimal", column, raw);
        Decimal::ZERO
    })
}

/// Strict read: an unparseable value is an error.
pub fn try_decimal_from_db(column: &str, raw: &str) -> Result<Decimal, StorageError> {
    parse_decimal(raw).ok_or_else(|| StorageError::InvalidValue {
        column: column.to_string(),
        value: raw.to_string(),
    })
}

pub fn date_to_db(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn try_date_from_db(column: &str, raw: &str) -> Result<NaiveDate, StorageError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| StorageError::InvalidValue {
        column: column.to_string(),
        value: raw.to_string(),
    })
}

pub fn date_from_db(column: &str, raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).unwrap_or_else(|e| {
        error!("Failed to parse {} '{}' as date: {}", column, raw, e);
        NaiveDate::default()
    })
}
