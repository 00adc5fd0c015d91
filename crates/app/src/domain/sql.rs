//! Row and parameter conversions shared by the repositories.
//!
//! Money is stored as integer minor units and timestamps as RFC 3339 UTC
//! text; these helpers convert at the repository edge so models stay typed.

use jiff::Timestamp;
use justeat::prices::Price;
use sqlx::{Row, sqlite::SqliteRow};

pub(crate) fn try_get_price(row: &SqliteRow, column: &str) -> sqlx::Result<Price> {
    let raw: i64 = row.try_get(column)?;

    u64::try_from(raw)
        .map(Price::from_minor)
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: Box::new(e),
        })
}

pub(crate) fn try_get_quantity(row: &SqliteRow, column: &str) -> sqlx::Result<u32> {
    let raw: i64 = row.try_get(column)?;

    u32::try_from(raw).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

pub(crate) fn try_get_timestamp(row: &SqliteRow, column: &str) -> sqlx::Result<Timestamp> {
    let raw: String = row.try_get(column)?;

    raw.parse()
        .map_err(|e: jiff::Error| sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: Box::new(e),
        })
}

/// Encode a price for an integer column.
pub(crate) fn price_to_i64(price: Price) -> sqlx::Result<i64> {
    i64::try_from(price.minor()).map_err(|e| sqlx::Error::ColumnDecode {
        index: "price".to_string(),
        source: Box::new(e),
    })
}
