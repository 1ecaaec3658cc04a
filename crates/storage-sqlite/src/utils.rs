//! Conversion helpers shared by the storage models.

use rust_decimal::Decimal;
use std::str::FromStr;

use agrivest_core::errors::Result;

use crate::errors::StorageError;

/// Parses a TEXT money column into a Decimal.
pub(crate) fn parse_money(value: &str, column: &str) -> Result<Decimal> {
    Decimal::from_str(value).map_err(|e| {
        StorageError::SerializationError(format!("{}: '{}' ({})", column, value, e)).into()
    })
}

/// Rejects unknown enum text stored in a column.
pub(crate) fn parse_enum<T>(parsed: Option<T>, column: &str, value: &str) -> Result<T> {
    parsed.ok_or_else(|| {
        StorageError::SerializationError(format!("{}: unknown value '{}'", column, value)).into()
    })
}
