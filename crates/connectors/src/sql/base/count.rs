//! Driver-neutral decoding of the `table_rows` column.

use crate::sql::base::error::DbError;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use tracing::debug;

/// A `table_rows` value as the driver handed it over.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCount {
    Null,
    Signed(i64),
    Unsigned(u64),
    Decimal(Decimal),
    Float(f64),
}

impl RawCount {
    /// Reads a count sent as text, as MySQL does for plain queries.
    pub fn parse_text(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Ok(v) = text.parse::<i64>() {
            Some(RawCount::Signed(v))
        } else if let Ok(v) = text.parse::<u64>() {
            Some(RawCount::Unsigned(v))
        } else if let Ok(v) = text.parse::<Decimal>() {
            Some(RawCount::Decimal(v))
        } else {
            text.parse::<f64>().ok().map(RawCount::Float)
        }
    }
}

/// Turns a raw count into a row count.
///
/// NULL counts as zero (`information_schema.TABLES` reports NULL for views).
/// Negative and fractional values are rejected.
pub fn row_count(table: &str, raw: RawCount) -> Result<u64, DbError> {
    let out_of_range = |value: String| DbError::CountOutOfRange {
        table: table.to_string(),
        value,
    };

    match raw {
        RawCount::Null => {
            debug!("Row count for table {} is NULL, counting 0", table);
            Ok(0)
        }
        RawCount::Unsigned(v) => Ok(v),
        RawCount::Signed(v) => u64::try_from(v).map_err(|_| out_of_range(v.to_string())),
        RawCount::Decimal(d) if d.fract().is_zero() => {
            d.to_u64().ok_or_else(|| out_of_range(d.to_string()))
        }
        RawCount::Decimal(d) => Err(out_of_range(d.to_string())),
        RawCount::Float(f) if f.is_finite() && f.fract() == 0.0 && f >= 0.0 => {
            // Saturates above u64::MAX, which no real table reaches.
            Ok(f as u64)
        }
        RawCount::Float(f) => Err(out_of_range(f.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_integers() {
        assert_eq!(row_count("orders", RawCount::Signed(42)).unwrap(), 42);
        assert_eq!(row_count("orders", RawCount::Signed(0)).unwrap(), 0);
        assert_eq!(
            row_count("orders", RawCount::Unsigned(u64::MAX)).unwrap(),
            u64::MAX
        );
    }

    #[test]
    fn test_null_counts_as_zero() {
        assert_eq!(row_count("v_orders", RawCount::Null).unwrap(), 0);
    }

    #[test]
    fn test_negative_is_rejected() {
        let err = row_count("orders", RawCount::Signed(-1)).unwrap_err();
        assert!(matches!(
            &err,
            DbError::CountOutOfRange { table, value } if table == "orders" && value == "-1"
        ));
        assert!(row_count("orders", RawCount::Float(-1.0)).is_err());
        assert!(row_count("orders", RawCount::Decimal(Decimal::from(-3))).is_err());
    }

    #[test]
    fn test_whole_decimal() {
        let d = Decimal::from_str("1200.000").unwrap();
        assert_eq!(row_count("orders", RawCount::Decimal(d)).unwrap(), 1200);
    }

    #[test]
    fn test_fractional_is_rejected() {
        let d = Decimal::from_str("12.5").unwrap();
        assert!(matches!(
            row_count("orders", RawCount::Decimal(d)),
            Err(DbError::CountOutOfRange { .. })
        ));
        assert!(row_count("orders", RawCount::Float(0.25)).is_err());
        assert!(row_count("orders", RawCount::Float(f64::NAN)).is_err());
    }

    #[test]
    fn test_whole_float() {
        // pg_class.reltuples is a float4.
        assert_eq!(row_count("orders", RawCount::Float(5000.0)).unwrap(), 5000);
    }

    #[test]
    fn test_parse_text() {
        assert_eq!(RawCount::parse_text("17"), Some(RawCount::Signed(17)));
        assert_eq!(
            RawCount::parse_text("18446744073709551615"),
            Some(RawCount::Unsigned(u64::MAX))
        );
        assert_eq!(
            RawCount::parse_text("3.00"),
            Some(RawCount::Decimal(Decimal::from_str("3.00").unwrap()))
        );
        assert_eq!(RawCount::parse_text("many"), None);
    }
}
