//! Input masks applied on every change event.
//!
//! Every transform is a pure string function and is idempotent on its own
//! output, so re-running a mask over an already-masked value is a no-op.

use crate::domain::form::FieldClass;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Applies the mask for `class` to `raw`. Classes without a mask pass the
/// input through unchanged.
pub fn mask(class: FieldClass, raw: &str) -> String {
    match class {
        FieldClass::NationalId => mask_national_id(raw),
        FieldClass::MonetaryAmount => mask_monetary(raw),
        FieldClass::PercentageRate => mask_percentage(raw),
        _ => raw.to_string(),
    }
}

/// Formats an 11-digit national identifier as `ddd.ddd.ddd-dd`, keeping
/// partial grouping while the user is still typing.
pub fn mask_national_id(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).take(11).collect();

    match digits.len() {
        0..=3 => digits,
        4..=6 => format!("{}.{}", &digits[..3], &digits[3..]),
        7..=9 => format!("{}.{}.{}", &digits[..3], &digits[3..6], &digits[6..]),
        _ => format!(
            "{}.{}.{}-{}",
            &digits[..3],
            &digits[3..6],
            &digits[6..9],
            &digits[9..]
        ),
    }
}

/// Cents-first monetary entry: every digit typed is a minor unit, so "1050"
/// reads as 10.50. The division by 100 is done by splicing the decimal point
/// into the digit string, which stays exact no matter how long the run of
/// digits gets.
pub fn mask_monetary(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return String::new();
    }

    let trimmed = digits.trim_start_matches('0');
    let padded = format!("{:0>3}", if trimmed.is_empty() { "0" } else { trimmed });
    let (units, cents) = padded.split_at(padded.len() - 2);
    format!("{units}.{cents}")
}

/// Percentage entry: digits plus a comma or period separator, normalized to a
/// period, clamped to [0, 100] and rendered with two fractional digits.
/// Anything that does not parse leaves the input untouched, preserving the
/// last valid state.
pub fn mask_percentage(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();
    let normalized = kept.replacen(',', ".", 1);
    let normalized = normalized.strip_suffix('.').unwrap_or(&normalized);
    let normalized = if normalized.starts_with('.') {
        format!("0{normalized}")
    } else {
        normalized.to_string()
    };

    match Decimal::from_str(&normalized) {
        Ok(value) if value > Decimal::ONE_HUNDRED => "100.00".to_string(),
        Ok(value) => format!(
            "{:.2}",
            value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        ),
        Err(_) => raw.to_string(),
    }
}
