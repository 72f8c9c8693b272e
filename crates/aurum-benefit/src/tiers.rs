//! Benefit table lookups.
//!
//! Days are abstract positions on a `1..=330` scale, not calendar dates.
//! Each row of [`BENEFIT_RANGES`] owns the half-open interval `[min, max)`;
//! the final day, 330, equals the last row's `max` and is assigned to that
//! row explicitly.

use aurum_core::constants::{
    BENEFIT_RANGES, MAX_DAY, MIN_DAY, NO_DAY, PERCENT_MATCH_TOLERANCE,
};
use aurum_core::types::{AmountLimits, BenefitRange};

/// Benefit range covering `day`, after clamping `day` to `[1, 330]`.
pub fn select_range_for_day(day: i64) -> &'static BenefitRange {
    let day = day.clamp(MIN_DAY as i64, MAX_DAY as i64) as u32;

    BENEFIT_RANGES
        .iter()
        .find(|range| range.contains(day))
        // Only day 330 falls through: it is the last row's exclusive max.
        .unwrap_or(&BENEFIT_RANGES[BENEFIT_RANGES.len() - 1])
}

/// First row whose percentage is within [`PERCENT_MATCH_TOLERANCE`] of
/// `percent`.
pub fn range_for_percent(percent: f64) -> Option<&'static BenefitRange> {
    BENEFIT_RANGES
        .iter()
        .find(|range| (range.percentage - percent).abs() < PERCENT_MATCH_TOLERANCE)
}

/// First day of the segment selected by `percent`.
///
/// Serves as the total-mode cutoff and as the slider position. Falls back to
/// the first row when `percent` matches no row.
pub fn segment_start_day(percent: f64) -> u32 {
    range_for_percent(percent)
        .unwrap_or(&BENEFIT_RANGES[0])
        .min
}

/// Linear position of `amount` between the limits, mapped onto `[1, 330]`.
///
/// Returns [`NO_DAY`] for non-positive amounts. Amounts below the minimum
/// interpolate below day 1 and are then clamped at 0, not 1.
pub fn amount_to_day(amount: f64, limits: &AmountLimits) -> u32 {
    if amount.is_nan() || amount <= 0.0 {
        return NO_DAY;
    }

    let clamped = amount.min(limits.max_amount());
    let progress = (clamped - limits.min_amount()) / limits.span();
    let day = (MIN_DAY as f64 + progress * (MAX_DAY - MIN_DAY) as f64).round();

    day.clamp(NO_DAY as f64, MAX_DAY as f64) as u32
}
