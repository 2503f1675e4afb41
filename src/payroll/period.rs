use std::fmt;

use chrono::{Datelike as _, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A calendar month payroll is generated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PayPeriod {
    start: NaiveDate,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodError {
    #[error("`{0}` is not a month between 01 and 12")]
    InvalidMonth(String),
    #[error("year {0} is out of range")]
    InvalidYear(i32),
}

impl PayPeriod {
    pub fn new(month: u32, year: i32) -> Result<Self, PeriodError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodError::InvalidMonth(month.to_string()));
        }

        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or(PeriodError::InvalidYear(year))?;
        // The last day must exist too, otherwise `end` has nothing to return
        start
            .checked_add_months(Months::new(1))
            .ok_or(PeriodError::InvalidYear(year))?;

        Ok(Self { start })
    }

    /// Accepts both `"3"` and `"03"`
    pub fn parse(month: &str, year: i32) -> Result<Self, PeriodError> {
        Self::new(parse_month(month)?, year)
    }

    /// The period containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self { start: date.with_day(1).unwrap_or(date) }
    }

    pub fn month(&self) -> u32 {
        self.start.month()
    }

    /// Two-digit month as stored on payroll records
    pub fn month_label(&self) -> String {
        format!("{:02}", self.start.month())
    }

    pub fn year(&self) -> i32 {
        self.start.year()
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(self.start)
    }

    pub fn days_in_month(&self) -> u32 {
        self.end().day()
    }
}

fn parse_month(month: &str) -> Result<u32, PeriodError> {
    match month.trim().parse::<u32>() {
        Ok(parsed) if (1..=12).contains(&parsed) => Ok(parsed),
        _ => Err(PeriodError::InvalidMonth(month.to_string())),
    }
}

/// Pads a month to the two-digit form records are stored with
pub fn normalize_month(month: &str) -> Result<String, PeriodError> {
    parse_month(month).map(|parsed| format!("{parsed:02}"))
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month_label(), self.year())
    }
}

#[derive(Serialize, Deserialize)]
struct PayPeriodRepr {
    month: String,
    year: i32,
}

impl Serialize for PayPeriod {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        PayPeriodRepr {
            month: self.month_label(),
            year: self.year(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PayPeriod {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = PayPeriodRepr::deserialize(deserializer)?;
        Self::parse(&repr.month, repr.year).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pads_month() {
        let period = PayPeriod::parse("3", 2025).unwrap();

        assert_eq!(period.month_label(), "03");
        assert_eq!(period.year(), 2025);
        assert_eq!(PayPeriod::parse("03", 2025).unwrap(), period);
    }

    #[test]
    fn test_parse_rejects_invalid_month() {
        assert_eq!(PayPeriod::parse("13", 2025), Err(PeriodError::InvalidMonth("13".to_string())));
        assert_eq!(PayPeriod::parse("0", 2025), Err(PeriodError::InvalidMonth("0".to_string())));
        assert_eq!(PayPeriod::parse("march", 2025), Err(PeriodError::InvalidMonth("march".to_string())));
    }

    #[test]
    fn test_normalize_month() {
        assert_eq!(normalize_month("7").unwrap(), "07");
        assert_eq!(normalize_month("11").unwrap(), "11");
        assert!(normalize_month("").is_err());
    }

    #[test]
    fn test_bounds() {
        let march = PayPeriod::parse("03", 2025).unwrap();
        assert_eq!(march.start(), NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(march.end(), NaiveDate::from_ymd_opt(2025, 3, 31).unwrap());
        assert_eq!(march.days_in_month(), 31);

        let leap_february = PayPeriod::new(2, 2024).unwrap();
        assert_eq!(leap_february.days_in_month(), 29);

        let december = PayPeriod::new(12, 2025).unwrap();
        assert_eq!(december.end(), NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    }

    #[test]
    fn test_containing() {
        let date = NaiveDate::from_ymd_opt(2025, 7, 19).unwrap();

        assert_eq!(PayPeriod::containing(date), PayPeriod::new(7, 2025).unwrap());
    }

    #[test]
    fn test_serde() {
        let period = PayPeriod::new(3, 2025).unwrap();

        let json = serde_json::to_value(period).unwrap();
        assert_eq!(json, serde_json::json!({ "month": "03", "year": 2025 }));

        let back: PayPeriod = serde_json::from_value(json).unwrap();
        assert_eq!(back, period);
    }
}
