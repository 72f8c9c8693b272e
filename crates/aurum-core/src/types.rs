//! Domain types for the benefit calculator.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LimitsError;

/// One row of the benefit table: days in `[min, max)` earn `percentage`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BenefitRange {
    /// First day of the range (inclusive).
    pub min: u32,
    /// End of the range (exclusive, except for the last row).
    pub max: u32,
    /// Benefit rate in percent.
    pub percentage: f64,
}

impl BenefitRange {
    /// Whether `day` falls in the half-open interval `[min, max)`.
    pub fn contains(&self, day: u32) -> bool {
        day >= self.min && day < self.max
    }
}

/// Lower and upper bound for a single contribution, in currency units.
///
/// Always satisfies `0 <= min_amount < max_amount`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AmountLimits {
    min_amount: f64,
    max_amount: f64,
}

impl AmountLimits {
    /// Validate and build a limits pair.
    pub fn new(min_amount: f64, max_amount: f64) -> Result<Self, LimitsError> {
        if !min_amount.is_finite() || !max_amount.is_finite() {
            return Err(LimitsError::NonFinite { min: min_amount, max: max_amount });
        }
        if min_amount < 0.0 {
            return Err(LimitsError::Negative(min_amount));
        }
        if min_amount >= max_amount {
            return Err(LimitsError::InvertedRange { min: min_amount, max: max_amount });
        }
        Ok(Self { min_amount, max_amount })
    }

    pub fn min_amount(&self) -> f64 {
        self.min_amount
    }

    pub fn max_amount(&self) -> f64 {
        self.max_amount
    }

    /// Width of the amount range; strictly positive.
    pub fn span(&self) -> f64 {
        self.max_amount - self.min_amount
    }

    /// Largest weight purchasable at `gold_rate`, or 0 if the rate is unusable.
    pub fn max_weight(&self, gold_rate: f64) -> f64 {
        if gold_rate > 0.0 && gold_rate.is_finite() {
            self.max_amount / gold_rate
        } else {
            0.0
        }
    }
}

/// Which input field the user edited last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Amount,
    Weight,
}

/// The authoritative input value together with the field it came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "field", content = "value")]
pub enum Source {
    /// Currency units.
    Amount(f64),
    /// Grams.
    Weight(f64),
}

impl Source {
    /// Pick the authoritative field from two raw values and an optional
    /// last-edited marker.
    ///
    /// The marker wins when present. Without it, weight is chosen when it is
    /// the only non-zero value, then amount when it is positive. Returns
    /// `None` when nothing has been entered.
    pub fn from_fields(weight: f64, amount: f64, last_changed: Option<Field>) -> Option<Self> {
        match last_changed {
            Some(Field::Weight) => Some(Self::Weight(weight)),
            Some(Field::Amount) => Some(Self::Amount(amount)),
            None if weight > 0.0 && amount == 0.0 => Some(Self::Weight(weight)),
            None if amount > 0.0 => Some(Self::Amount(amount)),
            None => None,
        }
    }

    pub fn field(&self) -> Field {
        match self {
            Self::Amount(_) => Field::Amount,
            Self::Weight(_) => Field::Weight,
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            Self::Amount(v) | Self::Weight(v) => *v,
        }
    }
}

/// How the benefit is accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculationMode {
    /// Flat percentage of the entered amount.
    #[default]
    Today,
    /// Day-by-day sum with the base rate before the selected tier's cutoff.
    Total,
}

impl fmt::Display for CalculationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Today => f.write_str("today"),
            Self::Total => f.write_str("total"),
        }
    }
}

impl FromStr for CalculationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "today" => Ok(Self::Today),
            "total" => Ok(Self::Total),
            other => Err(format!("unknown calculation mode '{other}' (expected 'today' or 'total')")),
        }
    }
}

/// Marker for the cosmetic blink shown when an input sits on a bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitSignal {
    Min,
    Max,
}

/// Everything the calculator needs for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalculationInput {
    pub source: Option<Source>,
    /// Currency per gram.
    pub gold_rate: f64,
    pub limits: AmountLimits,
    pub benefit_percent: f64,
    pub mode: CalculationMode,
}

/// Clamped, mutually consistent amount and weight.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct EnteredPair {
    pub entered_amount: f64,
    pub entered_weight: f64,
}

/// Reward earned on an [`EnteredPair`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BenefitPayout {
    pub benefit_amount: f64,
    pub benefit_weight: f64,
}

/// Values shown to the user after each input event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalculationOutput {
    pub entered_amount: f64,
    pub entered_weight: f64,
    pub benefit_amount: f64,
    pub benefit_weight: f64,
    pub you_get_amount: f64,
    pub you_get_weight: f64,
    pub benefit_percent: f64,
    pub limit: Option<LimitSignal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_accept_ordered_pair() {
        let limits = AmountLimits::new(100.0, 100_000.0).unwrap();
        assert_eq!(limits.min_amount(), 100.0);
        assert_eq!(limits.max_amount(), 100_000.0);
        assert_eq!(limits.span(), 99_900.0);
    }

    #[test]
    fn limits_reject_inverted_and_equal() {
        assert_eq!(
            AmountLimits::new(500.0, 100.0),
            Err(LimitsError::InvertedRange { min: 500.0, max: 100.0 })
        );
        assert!(AmountLimits::new(100.0, 100.0).is_err());
    }

    #[test]
    fn limits_reject_negative_and_nan() {
        assert_eq!(AmountLimits::new(-1.0, 10.0), Err(LimitsError::Negative(-1.0)));
        assert!(matches!(
            AmountLimits::new(f64::NAN, 10.0),
            Err(LimitsError::NonFinite { .. })
        ));
        assert!(AmountLimits::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn max_weight_guards_rate() {
        let limits = AmountLimits::new(0.0, 1000.0).unwrap();
        assert_eq!(limits.max_weight(500.0), 2.0);
        assert_eq!(limits.max_weight(0.0), 0.0);
        assert_eq!(limits.max_weight(-3.0), 0.0);
    }

    #[test]
    fn source_explicit_marker_wins() {
        assert_eq!(
            Source::from_fields(1.5, 0.0, Some(Field::Amount)),
            Some(Source::Amount(0.0))
        );
        assert_eq!(
            Source::from_fields(0.0, 900.0, Some(Field::Weight)),
            Some(Source::Weight(0.0))
        );
    }

    #[test]
    fn source_fallback_order() {
        assert_eq!(Source::from_fields(1.5, 0.0, None), Some(Source::Weight(1.5)));
        assert_eq!(Source::from_fields(1.5, 900.0, None), Some(Source::Amount(900.0)));
        assert_eq!(Source::from_fields(0.0, 900.0, None), Some(Source::Amount(900.0)));
        assert_eq!(Source::from_fields(0.0, 0.0, None), None);
    }

    #[test]
    fn source_accessors() {
        let s = Source::Weight(2.25);
        assert_eq!(s.field(), Field::Weight);
        assert_eq!(s.value(), 2.25);
    }

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("TOTAL".parse::<CalculationMode>(), Ok(CalculationMode::Total));
        assert_eq!("today".parse::<CalculationMode>(), Ok(CalculationMode::Today));
        assert!("weekly".parse::<CalculationMode>().is_err());
        assert_eq!(CalculationMode::default(), CalculationMode::Today);
        assert_eq!(CalculationMode::Total.to_string(), "total");
    }

    #[test]
    fn range_contains_is_half_open() {
        let r = BenefitRange { min: 1, max: 76, percentage: 5.0 };
        assert!(r.contains(1));
        assert!(r.contains(75));
        assert!(!r.contains(76));
    }

    #[test]
    fn source_serializes_tagged() {
        let json = serde_json::to_string(&Source::Amount(250.0)).unwrap();
        assert_eq!(json, r#"{"field":"amount","value":250.0}"#);
    }
}
