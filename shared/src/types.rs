//! Common types used across the dashboard

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A closed enumeration with a human-readable label.
///
/// Filters and form inputs refer to variants by label, by slug
/// ("ready-to-ship") or by serde name ("ready_to_ship"); all three
/// resolve through [`Labeled::parse_label`].
pub trait Labeled: Sized + Copy + PartialEq + 'static {
    /// Name of the enumeration used in error messages
    const KIND: &'static str;

    /// Every variant, in display order
    const ALL: &'static [Self];

    fn label(&self) -> &'static str;

    fn slug(&self) -> String {
        slugify(self.label())
    }

    fn parse_label(raw: &str) -> CoreResult<Self> {
        let wanted = slugify(raw);
        Self::ALL
            .iter()
            .copied()
            .find(|variant| variant.slug() == wanted)
            .ok_or_else(|| CoreError::unknown(Self::KIND, raw))
    }
}

/// Lowercase a label and join its words with `-`.
///
/// Whitespace, underscores and slashes all count as word separators.
pub fn slugify(raw: &str) -> String {
    raw.trim()
        .split(|c: char| c.is_whitespace() || c == '_' || c == '/')
        .filter(|word| !word.is_empty())
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// Format an amount as dollars with thousands separators, e.g. `$2,847.50`
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded);
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}${}.{}", sign, grouped, cents)
}

/// Inclusive date range for queries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// True when `date` falls inside the range. An inverted range contains nothing.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Ready to Ship"), "ready-to-ship");
        assert_eq!(slugify("ready_to_ship"), "ready-to-ship");
        assert_eq!(slugify("  Quality   Control "), "quality-control");
        assert_eq!(slugify("Picker/Packer"), "picker-packer");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(Decimal::from_str("2847.5").unwrap()), "$2,847.50");
        assert_eq!(format_money(Decimal::from_str("25.99").unwrap()), "$25.99");
        assert_eq!(format_money(Decimal::from_str("1234567.891").unwrap()), "$1,234,567.89");
        assert_eq!(format_money(Decimal::ZERO), "$0.00");
        assert_eq!(format_money(Decimal::from_str("-12.5").unwrap()), "-$12.50");
    }

    #[test]
    fn test_date_range_contains() {
        let start = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 12, 27).unwrap();
        let range = DateRange::new(start, end);

        assert!(range.contains(start));
        assert!(range.contains(end));
        assert!(!range.contains(NaiveDate::from_ymd_opt(2024, 12, 28).unwrap()));

        let inverted = DateRange::new(end, start);
        assert!(!inverted.contains(NaiveDate::from_ymd_opt(2024, 12, 26).unwrap()));
    }
}
