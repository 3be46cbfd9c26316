//! Null-safe comparison helpers for property values.
//!
//! Two absent values are equal and an absent value orders before any present
//! one. Timestamps are compared at whole-second precision.

use crate::core::Value;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

pub fn compare_nullable<T: Ord + ?Sized>(left: Option<&T>, right: Option<&T>) -> Ordering {
    match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.cmp(b),
    }
}

pub fn eq_nullable<T: PartialEq + ?Sized>(left: Option<&T>, right: Option<&T>) -> bool {
    match (left, right) {
        (None, None) => true,
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

pub fn compare_text(left: Option<&str>, right: Option<&str>) -> Ordering {
    compare_nullable(left, right)
}

pub fn text_equal(left: Option<&str>, right: Option<&str>) -> bool {
    eq_nullable(left, right)
}

pub fn compare_timestamps(left: Option<&DateTime<Utc>>, right: Option<&DateTime<Utc>>) -> Ordering {
    compare_nullable(
        left.map(DateTime::timestamp).as_ref(),
        right.map(DateTime::timestamp).as_ref(),
    )
}

pub fn timestamps_equal(left: Option<&DateTime<Utc>>, right: Option<&DateTime<Utc>>) -> bool {
    compare_timestamps(left, right) == Ordering::Equal
}

/// Null-safe ordering of two property values.
///
/// Returns `None` when both values are present but of different types.
pub fn compare_values(left: Option<&Value>, right: Option<&Value>) -> Option<Ordering> {
    match (left, right) {
        (Some(Value::Timestamp(a)), Some(Value::Timestamp(b))) => {
            Some(compare_timestamps(Some(a), Some(b)))
        }
        (Some(a), Some(b)) => a.compare(b),
        (None, None) => Some(Ordering::Equal),
        (None, Some(_)) => Some(Ordering::Less),
        (Some(_), None) => Some(Ordering::Greater),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_absent_values() {
        assert_eq!(compare_nullable::<i64>(None, None), Ordering::Equal);
        assert_eq!(compare_nullable(None, Some(&1)), Ordering::Less);
        assert_eq!(compare_nullable(Some(&1), None), Ordering::Greater);
        assert!(eq_nullable::<i64>(None, None));
        assert!(!eq_nullable(Some(&1), None));
    }

    #[test]
    fn test_text_uses_natural_order() {
        assert_eq!(compare_text(Some("a"), Some("b")), Ordering::Less);
        assert_eq!(compare_text(None, Some("")), Ordering::Less);
        assert!(text_equal(Some("Ada"), Some("Ada")));
        assert!(!text_equal(Some("Ada"), Some("ada")));
    }

    #[test]
    fn test_timestamps_ignore_sub_second_precision() {
        let base = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let later_same_second = base + Duration::milliseconds(750);
        let next_second = base + Duration::seconds(1);

        assert!(timestamps_equal(Some(&base), Some(&later_same_second)));
        assert_eq!(compare_timestamps(Some(&base), Some(&next_second)), Ordering::Less);
        assert!(timestamps_equal(None, None));
        assert_eq!(compare_timestamps(None, Some(&base)), Ordering::Less);
    }

    #[test]
    fn test_property_values() {
        let base = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let early = Value::Timestamp(base);
        let late = Value::Timestamp(base + Duration::milliseconds(300));

        assert_eq!(compare_values(Some(&early), Some(&late)), Some(Ordering::Equal));
        assert_eq!(compare_values(None, Some(&early)), Some(Ordering::Less));
        assert_eq!(
            compare_values(Some(&Value::Integer(2)), Some(&Value::Integer(1))),
            Some(Ordering::Greater)
        );
        assert_eq!(compare_values(Some(&Value::Integer(2)), Some(&early)), None);
    }
}
