//! Numeric text entry.
//!
//! Amounts are whole currency units; weights are grams with at most
//! [`WEIGHT_DECIMALS`] fractional digits. Sanitizers drop offending
//! characters instead of rejecting the keystroke.

use crate::constants::WEIGHT_DECIMALS;
use crate::error::InputError;

/// Keep ASCII digits only.
pub fn sanitize_amount_text(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Keep digits and the first decimal point, truncating the fraction to
/// [`WEIGHT_DECIMALS`] digits.
pub fn sanitize_weight_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut seen_point = false;
    let mut decimals = 0usize;

    for c in raw.chars() {
        if c.is_ascii_digit() {
            if seen_point {
                if decimals == WEIGHT_DECIMALS {
                    continue;
                }
                decimals += 1;
            }
            out.push(c);
        } else if c == '.' && !seen_point {
            seen_point = true;
            out.push(c);
        }
    }

    out
}

/// Parse sanitized amount text.
pub fn parse_amount(text: &str) -> Result<f64, InputError> {
    parse_number(&sanitize_amount_text(text))
}

/// Parse sanitized weight text. A lone `"."` counts as empty.
pub fn parse_weight(text: &str) -> Result<f64, InputError> {
    parse_number(&sanitize_weight_text(text))
}

fn parse_number(clean: &str) -> Result<f64, InputError> {
    if clean.is_empty() || clean == "." {
        return Err(InputError::Empty);
    }
    clean
        .parse::<f64>()
        .map_err(|_| InputError::Unparseable(clean.to_string()))
}

/// Display form of a weight: fixed [`WEIGHT_DECIMALS`] places.
pub fn format_weight(weight: f64) -> String {
    format!("{weight:.prec$}", prec = WEIGHT_DECIMALS)
}

/// Truncate `weight` to [`WEIGHT_DECIMALS`] places, never rounding up.
pub fn floor_weight(weight: f64) -> f64 {
    let scale = 10f64.powi(WEIGHT_DECIMALS as i32);
    (weight * scale).floor() / scale
}

/// Display form of an amount: nearest whole unit.
pub fn format_amount(amount: f64) -> String {
    format!("{:.0}", amount.round())
}
