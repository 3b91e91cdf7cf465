use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::Price;

/// Filter value meaning "no filter".
const ANY: &str = "all";

/// Case-insensitive substring match. An empty needle matches everything.
#[must_use]
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Whether a select-box value means "no filter": missing, blank or `all`.
#[must_use]
pub fn is_any(choice: Option<&str>) -> bool {
    choice.is_none_or(|c| c.trim().is_empty() || c == ANY)
}

/// Exact match against a select-box value, where [`is_any`] matches
/// everything.
#[must_use]
pub fn matches_choice(value: &str, choice: Option<&str>) -> bool {
    is_any(choice) || choice == Some(value)
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PriceRangeError {
    #[error("price range must look like `min-max`")]
    Format,
    #[error("invalid amount in price range: {0}")]
    Amount(String),
    #[error("price range minimum exceeds maximum")]
    Inverted,
}

/// Inclusive price bracket, written `min-max` (e.g. `100000-500000`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    pub min: Price,
    pub max: Price,
}

impl PriceRange {
    /// Whether `price` lies within the bracket, bounds included.
    #[must_use]
    pub fn contains(&self, price: Price) -> bool {
        self.min <= price && price <= self.max
    }
}

impl FromStr for PriceRange {
    type Err = PriceRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (min, max) = s.trim().split_once('-').ok_or(PriceRangeError::Format)?;
        let amount = |raw: &str| {
            Decimal::from_str(raw.trim())
                .map(Price::new)
                .map_err(|_| PriceRangeError::Amount(raw.trim().to_owned()))
        };
        let range = Self {
            min: amount(min)?,
            max: amount(max)?,
        };
        if range.min > range.max {
            return Err(PriceRangeError::Inverted);
        }
        Ok(range)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid date `{0}`, expected YYYY-MM-DD")]
pub struct DateRangeError(pub String);

/// Calendar-day window with optional bounds, both inclusive.
///
/// A timestamp matches when its UTC date falls within the window, so the
/// whole end day is included. Timestamps that are missing never match a
/// bounded window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Build a window from `YYYY-MM-DD` strings; blank strings leave that
    /// side open.
    ///
    /// # Errors
    ///
    /// Returns an error if a non-blank bound is not a valid date.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self, DateRangeError> {
        let day = |raw: Option<&str>| -> Result<Option<NaiveDate>, DateRangeError> {
            match raw.map(str::trim).filter(|s| !s.is_empty()) {
                None => Ok(None),
                Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .map(Some)
                    .map_err(|_| DateRangeError(s.to_owned())),
            }
        };
        Ok(Self {
            start: day(start)?,
            end: day(end)?,
        })
    }

    /// Whether neither bound is set.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    #[must_use]
    pub fn contains(&self, timestamp: Option<DateTime<Utc>>) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let Some(day) = timestamp.map(|ts| ts.date_naive()) else {
            return false;
        };
        self.start.is_none_or(|start| day >= start) && self.end.is_none_or(|end| day <= end)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Giày Chạy Bộ", "chạy"));
        assert!(contains_ignore_case("anything", "  "));
        assert!(!contains_ignore_case("Bóng đá", "rổ"));
    }

    #[test]
    fn test_choice_any() {
        assert!(is_any(None));
        assert!(is_any(Some("all")));
        assert!(is_any(Some("")));
        assert!(matches_choice("active", Some("all")));
        assert!(matches_choice("active", Some("active")));
        assert!(!matches_choice("locked", Some("active")));
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let range: PriceRange = "100000-500000".parse().unwrap();
        assert!(range.contains(Price::from_dong(100_000)));
        assert!(range.contains(Price::from_dong(500_000)));
        assert!(!range.contains(Price::from_dong(500_001)));
        assert!(!range.contains(Price::from_dong(99_999)));
    }

    #[test]
    fn test_price_range_rejects_garbage() {
        assert_eq!("100000".parse::<PriceRange>(), Err(PriceRangeError::Format));
        assert!(matches!(
            "abc-200".parse::<PriceRange>(),
            Err(PriceRangeError::Amount(_))
        ));
        assert_eq!("500-100".parse::<PriceRange>(), Err(PriceRangeError::Inverted));
    }

    #[test]
    fn test_date_range_includes_whole_end_day() {
        let range = DateRange::parse(Some("2024-05-01"), Some("2024-05-31")).unwrap();
        let ts = |s: &str| Some(s.parse::<DateTime<Utc>>().unwrap());

        assert!(range.contains(ts("2024-05-01T00:00:00Z")));
        assert!(range.contains(ts("2024-05-31T23:59:59Z")));
        assert!(!range.contains(ts("2024-06-01T00:00:00Z")));
        assert!(!range.contains(ts("2024-04-30T23:59:59Z")));
        assert!(!range.contains(None));
    }

    #[test]
    fn test_date_range_open_sides() {
        let unbounded = DateRange::parse(None, Some(" ")).unwrap();
        assert!(unbounded.is_unbounded());
        assert!(unbounded.contains(None));

        let from = DateRange::parse(Some("2024-05-01"), None).unwrap();
        assert!(from.contains(Some("2030-01-01T00:00:00Z".parse().unwrap())));

        assert!(DateRange::parse(Some("01/05/2024"), None).is_err());
    }
}
