//! Amount/weight conversion through the gold rate.
//!
//! Only the upper bound is enforced here. Zero and sub-minimum amounts pass
//! through untouched and are rejected, if at all, at submission.

use aurum_core::types::{AmountLimits, EnteredPair, Source};

/// A rate the conversions can divide by.
pub fn is_usable_rate(gold_rate: f64) -> bool {
    gold_rate.is_finite() && gold_rate > 0.0
}

/// Grams bought by `amount`; 0 for an unusable rate.
pub fn amount_to_weight(amount: f64, gold_rate: f64) -> f64 {
    if !is_usable_rate(gold_rate) {
        return 0.0;
    }
    amount / gold_rate
}

/// Whole-unit price of `weight`; 0 for an unusable rate.
pub fn weight_to_amount(weight: f64, gold_rate: f64) -> f64 {
    if !is_usable_rate(gold_rate) {
        return 0.0;
    }
    (weight * gold_rate).round()
}

/// Clamp the authoritative value into `[0, max]` and derive the other one.
///
/// The derived amount for a weight source is not rounded; rounding is a
/// display concern.
pub fn resolve_entered_pair(
    source: Option<Source>,
    limits: &AmountLimits,
    gold_rate: f64,
) -> EnteredPair {
    let Some(source) = source else {
        return EnteredPair::default();
    };
    if !is_usable_rate(gold_rate) {
        return EnteredPair::default();
    }

    let max_amount = limits.max_amount();
    let max_weight = limits.max_weight(gold_rate);

    match source {
        Source::Weight(weight) => {
            let weight = zero_if_nan(weight).clamp(0.0, max_weight);
            EnteredPair {
                entered_amount: (weight * gold_rate).clamp(0.0, max_amount),
                entered_weight: weight,
            }
        }
        Source::Amount(amount) => {
            let amount = zero_if_nan(amount).clamp(0.0, max_amount);
            EnteredPair {
                entered_amount: amount,
                entered_weight: (amount / gold_rate).clamp(0.0, max_weight),
            }
        }
    }
}

fn zero_if_nan(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value }
}
