use chrono::NaiveDate;
use guarda_din_bot::format::{ParseError, format_currency, parse_amount, parse_date_flexible};
use rust_decimal::Decimal;

#[test]
fn comma_and_point_amounts_are_equal() {
    assert_eq!(parse_amount("15,90"), parse_amount("15.90"));
    assert_eq!(parse_amount(" 15,90 "), Ok(Decimal::new(1590, 2)));
}

#[test]
fn amounts_are_rounded_to_cents() {
    assert_eq!(parse_amount("10.005"), Ok(Decimal::new(1001, 2)));
    assert_eq!(parse_amount("0.004"), Err(ParseError::NonPositiveAmount));
}

#[test]
fn amounts_beyond_the_column_are_refused() {
    assert_eq!(parse_amount("9999999999,99"), Ok(Decimal::new(999_999_999_999, 2)));
    assert_eq!(parse_amount("10000000000"), Err(ParseError::AmountTooLarge));
}

#[test]
fn non_numbers_are_invalid() {
    assert!(matches!(parse_amount("dez"), Err(ParseError::InvalidAmount(_))));
    assert!(matches!(parse_amount(""), Err(ParseError::InvalidAmount(_))));
}

#[test]
fn three_date_layouts_are_accepted() {
    let day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    assert_eq!(parse_date_flexible("05/03/2024"), Ok(day));
    assert_eq!(parse_date_flexible("05-03-2024"), Ok(day));
    assert_eq!(parse_date_flexible("2024-03-05"), Ok(day));
}

#[test]
fn other_dates_are_invalid_format() {
    assert!(matches!(
        parse_date_flexible("03/2024"),
        Err(ParseError::InvalidFormat(_))
    ));
    assert!(matches!(
        parse_date_flexible("30/02/2024"),
        Err(ParseError::InvalidFormat(_))
    ));
}

#[test]
fn currency_uses_brazilian_grouping() {
    assert_eq!(format_currency(Decimal::new(12345, 1)), "R$ 1.234,50");
    assert_eq!(format_currency(Decimal::new(5, 1)), "R$ 0,50");
    assert_eq!(format_currency(Decimal::new(123456789, 2)), "R$ 1.234.567,89");
}
