//! Benefit engine implementing the [`BenefitCalculator`] trait.
//!
//! Today mode is a single multiplication. Total mode walks the day scale one
//! day at a time: each day's pro-rata share earns the base rate before the
//! selected tier's first day and the selected rate from then on. The loop
//! is kept literal so results match the per-day ledger bit for bit.

use aurum_core::constants::BASE_BENEFIT_PERCENT;
use aurum_core::traits::BenefitCalculator;
use aurum_core::types::{
    AmountLimits, BenefitPayout, BenefitRange, CalculationMode, EnteredPair, LimitSignal, Source,
};

use crate::conversion::{self, is_usable_rate};
use crate::tiers;

/// The production benefit calculator.
///
/// Stateless; every call depends only on its arguments.
#[derive(Debug, Clone, Default)]
pub struct BenefitEngine;

impl BenefitEngine {
    /// Create a new BenefitEngine.
    pub fn new() -> Self {
        Self
    }
}

/// Flat-rate benefit on the whole pair.
fn today_benefit(pair: &EnteredPair, benefit_percent: f64) -> BenefitPayout {
    BenefitPayout {
        benefit_amount: pair.entered_amount * benefit_percent / 100.0,
        benefit_weight: pair.entered_weight * benefit_percent / 100.0,
    }
}

/// Day-by-day benefit up to the amount's position on the day scale.
fn total_benefit(
    pair: &EnteredPair,
    benefit_percent: f64,
    limits: &AmountLimits,
    gold_rate: f64,
) -> BenefitPayout {
    let total_days = tiers::amount_to_day(pair.entered_amount, limits);
    if total_days == 0 {
        return BenefitPayout::default();
    }

    let clamped_amount = pair.entered_amount.clamp(0.0, limits.max_amount());
    let amount_per_day = clamped_amount / total_days as f64;
    let weight_per_day = if is_usable_rate(gold_rate) {
        amount_per_day / gold_rate
    } else {
        0.0
    };
    let cutoff_day = tiers::segment_start_day(benefit_percent);

    let mut payout = BenefitPayout::default();
    for day in 1..=total_days {
        let percent = if day < cutoff_day {
            BASE_BENEFIT_PERCENT
        } else {
            benefit_percent
        };
        payout.benefit_amount += amount_per_day * percent / 100.0;
        payout.benefit_weight += weight_per_day * percent / 100.0;
    }
    payout
}

impl BenefitCalculator for BenefitEngine {
    fn amount_to_weight(&self, amount: f64, gold_rate: f64) -> f64 {
        conversion::amount_to_weight(amount, gold_rate)
    }

    fn weight_to_amount(&self, weight: f64, gold_rate: f64) -> f64 {
        conversion::weight_to_amount(weight, gold_rate)
    }

    fn resolve_entered_pair(
        &self,
        source: Option<Source>,
        limits: &AmountLimits,
        gold_rate: f64,
    ) -> EnteredPair {
        conversion::resolve_entered_pair(source, limits, gold_rate)
    }

    fn select_range_for_day(&self, day: i64) -> &'static BenefitRange {
        tiers::select_range_for_day(day)
    }

    fn amount_to_day(&self, amount: f64, limits: &AmountLimits) -> u32 {
        tiers::amount_to_day(amount, limits)
    }

    fn compute_benefit(
        &self,
        pair: &EnteredPair,
        benefit_percent: f64,
        mode: CalculationMode,
        limits: &AmountLimits,
        gold_rate: f64,
    ) -> BenefitPayout {
        match mode {
            CalculationMode::Today => today_benefit(pair, benefit_percent),
            CalculationMode::Total => total_benefit(pair, benefit_percent, limits, gold_rate),
        }
    }

    fn limit_signal(
        &self,
        pair: &EnteredPair,
        limits: &AmountLimits,
        gold_rate: f64,
    ) -> Option<LimitSignal> {
        if pair.entered_amount <= 0.0 {
            return Some(LimitSignal::Min);
        }
        let at_max_weight =
            is_usable_rate(gold_rate) && pair.entered_weight >= limits.max_weight(gold_rate);
        if pair.entered_amount >= limits.max_amount() || at_max_weight {
            return Some(LimitSignal::Max);
        }
        None
    }
}
