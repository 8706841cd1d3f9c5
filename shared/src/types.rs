//! Common types used across the recommender

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Placeholder shown in the month selector before a month is chosen
pub const UNSET_MONTH: &str = "Select a Month";

/// Placeholder shown in the region selector before a region is chosen
pub const UNSET_REGION: &str = "Select a State";

/// Calendar month used as a lookup key into the weather reference table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// All months in calendar order
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    /// First three characters of the month name, e.g. "Jul"
    ///
    /// Reference rows match when their month cell starts with this prefix,
    /// so both "July" and "Jul" cells are found.
    pub fn prefix(&self) -> &'static str {
        &self.name()[..3]
    }

    /// Parse a selector value, mapping the placeholder (or an empty string) to `None`
    pub fn from_selection(value: &str) -> Result<Option<Month>, UnknownMonth> {
        if value.trim().is_empty() || value == UNSET_MONTH {
            return Ok(None);
        }
        value.parse().map(Some)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a selector value is not one of the twelve month names
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown month: {0}")]
pub struct UnknownMonth(pub String);

impl FromStr for Month {
    type Err = UnknownMonth;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Month::ALL
            .iter()
            .copied()
            .find(|m| m.name() == s)
            .ok_or_else(|| UnknownMonth(s.to_string()))
    }
}

/// Map a region selector value to `None` when it is the placeholder or empty
pub fn region_from_selection(value: &str) -> Option<&str> {
    if value.trim().is_empty() || value == UNSET_REGION {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_prefix() {
        assert_eq!(Month::July.prefix(), "Jul");
        assert_eq!(Month::September.prefix(), "Sep");
        assert_eq!(Month::May.prefix(), "May");
    }

    #[test]
    fn test_month_from_selection() {
        assert_eq!(Month::from_selection("March"), Ok(Some(Month::March)));
        assert_eq!(Month::from_selection(UNSET_MONTH), Ok(None));
        assert_eq!(Month::from_selection(""), Ok(None));
        assert!(Month::from_selection("march").is_err());
        assert!(Month::from_selection("Smarch").is_err());
    }

    #[test]
    fn test_region_from_selection() {
        assert_eq!(region_from_selection("Texas"), Some("Texas"));
        assert_eq!(region_from_selection(UNSET_REGION), None);
        assert_eq!(region_from_selection("  "), None);
    }
}
