//! Display and parsing helpers for money and calendar dates.
//!
//! Amounts are shown in the Brazilian convention (`R$ 1.234,50`) and typed by
//! users with either a decimal comma or a decimal point.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use thiserror::Error;

pub const CURRENCY_PREFIX: &str = "R$";

/// Accepted manual date layouts, tried in order.
const DATE_FORMATS: [&str; 3] = ["%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d"];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("`{0}` is not a number")]
    InvalidAmount(String),
    #[error("amount must be greater than zero")]
    NonPositiveAmount,
    #[error("amount exceeds the largest storable value")]
    AmountTooLarge,
    #[error("`{0}` is not a date in a supported format")]
    InvalidFormat(String),
}

/// Renders `amount` as `R$ 1.234,50`: two decimals, `.` between thousands, `,` before cents.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    // `{:.2}` on the absolute value always yields `<digits>.<two digits>`.
    let plain = format!("{:.2}", rounded.abs());
    let (int_part, cents) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*ch);
    }
    format!("{CURRENCY_PREFIX} {sign}{grouped},{cents}")
}

/// Largest amount the `NUMERIC(12, 2)` column holds.
pub fn max_amount() -> Decimal {
    Decimal::new(999_999_999_999, 2)
}

/// Parses a user-typed amount such as `15,90` or `15.90`.
/// The result is rounded to cents, strictly positive and at most [`max_amount`].
pub fn parse_amount(text: &str) -> Result<Decimal, ParseError> {
    let normalized = text.trim().replace(',', ".");
    let value = Decimal::from_str(&normalized)
        .map_err(|_| ParseError::InvalidAmount(text.trim().to_string()))?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if value <= Decimal::ZERO {
        return Err(ParseError::NonPositiveAmount);
    }
    if value > max_amount() {
        return Err(ParseError::AmountTooLarge);
    }
    Ok(value)
}

/// Parses `dd/mm/yyyy`, `dd-mm-yyyy` or `yyyy-mm-dd`; the first layout that fits wins.
pub fn parse_date_flexible(text: &str) -> Result<NaiveDate, ParseError> {
    let trimmed = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| ParseError::InvalidFormat(trimmed.to_string()))
}

/// `05/03` style label used in report headers.
pub fn short_date(date: NaiveDate) -> String {
    date.format("%d/%m").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(dec("1234.5")), "R$ 1.234,50");
        assert_eq!(format_currency(dec("1234567.891")), "R$ 1.234.567,89");
        assert_eq!(format_currency(dec("999")), "R$ 999,00");
        assert_eq!(format_currency(Decimal::ZERO), "R$ 0,00");
    }

    #[test]
    fn currency_keeps_sign() {
        assert_eq!(format_currency(dec("-1500")), "R$ -1.500,00");
    }

    #[test]
    fn amount_rejects_zero_and_text() {
        assert_eq!(parse_amount("0"), Err(ParseError::NonPositiveAmount));
        assert_eq!(parse_amount("-3,00"), Err(ParseError::NonPositiveAmount));
        assert!(matches!(parse_amount("abc"), Err(ParseError::InvalidAmount(_))));
        assert!(matches!(parse_amount(""), Err(ParseError::InvalidAmount(_))));
    }

    #[test]
    fn amount_must_fit_the_column() {
        assert_eq!(parse_amount("9999999999,99"), Ok(dec("9999999999.99")));
        assert_eq!(parse_amount("10000000000"), Err(ParseError::AmountTooLarge));
        assert_eq!(parse_amount("9999999999.995"), Err(ParseError::AmountTooLarge));
    }
}
