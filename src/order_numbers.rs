//! Order numbers

use jiff::{Timestamp, tz::TimeZone};
use uuid::Uuid;

/// Formats a human-readable order number.
///
/// Shape: `ORD` + the UTC second (`YYYYMMDDHHMMSS`) + microseconds + the
/// leading 32 bits of the customer id in hex + a caller-supplied three-digit
/// suffix. Uniqueness is ultimately guaranteed by the unique index on the
/// orders table; the format keeps collisions vanishingly rare under
/// concurrent checkouts by many customers.
#[must_use]
pub fn order_number(placed_at: Timestamp, customer: Uuid, suffix: u16) -> String {
    let utc = placed_at.to_zoned(TimeZone::UTC);
    let (customer_head, ..) = customer.as_fields();

    format!(
        "ORD{:04}{:02}{:02}{:02}{:02}{:02}{:06}{:08x}{:03}",
        utc.year(),
        utc.month(),
        utc.day(),
        utc.hour(),
        utc.minute(),
        utc.second(),
        placed_at.subsec_nanosecond() / 1000,
        customer_head,
        suffix % 1000,
    )
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn formats_all_components() -> TestResult {
        let placed_at: Timestamp = "2025-03-01T12:30:45.123456Z".parse()?;
        let customer = Uuid::from_u128(0x0123_4567_89ab_cdef_0123_4567_89ab_cdef);

        let number = order_number(placed_at, customer, 42);

        assert_eq!(number, "ORD2025030112304512345601234567042");

        Ok(())
    }

    #[test]
    fn suffix_is_clamped_to_three_digits() -> TestResult {
        let placed_at: Timestamp = "2025-03-01T12:30:45Z".parse()?;
        let customer = Uuid::nil();

        let number = order_number(placed_at, customer, 1042);

        assert!(number.ends_with("042"), "got {number}");

        Ok(())
    }

    #[test]
    fn distinct_customers_get_distinct_numbers() -> TestResult {
        let placed_at: Timestamp = "2025-03-01T12:30:45Z".parse()?;

        let a = order_number(placed_at, Uuid::now_v7(), 500);
        let b = order_number(placed_at, Uuid::now_v7(), 500);

        assert_ne!(a, b);

        Ok(())
    }
}
