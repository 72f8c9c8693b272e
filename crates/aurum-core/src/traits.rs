//! Trait interfaces between crates.
//!
//! - [`BenefitCalculator`] — tier lookup and benefit math (aurum-benefit implements)

use crate::types::{
    AmountLimits, BenefitPayout, BenefitRange, CalculationInput, CalculationMode,
    CalculationOutput, EnteredPair, LimitSignal, Source,
};

/// Pure benefit computation over the tiered day table.
///
/// Every method is total: inputs outside their domain are clamped, and an
/// unusable gold rate (zero, negative, non-finite) yields zero weights.
pub trait BenefitCalculator: Send + Sync {
    /// Gold weight bought by `amount` at `gold_rate`.
    fn amount_to_weight(&self, amount: f64, gold_rate: f64) -> f64;

    /// Amount, rounded to a whole unit, paid for `weight` at `gold_rate`.
    fn weight_to_amount(&self, weight: f64, gold_rate: f64) -> f64;

    /// Clamp the authoritative value to the maximum and derive its partner.
    fn resolve_entered_pair(
        &self,
        source: Option<Source>,
        limits: &AmountLimits,
        gold_rate: f64,
    ) -> EnteredPair;

    /// Benefit range covering `day` after clamping it to the day scale.
    fn select_range_for_day(&self, day: i64) -> &'static BenefitRange;

    /// Position of `amount` on the day scale, or `0` when nothing is entered.
    fn amount_to_day(&self, amount: f64, limits: &AmountLimits) -> u32;

    /// Benefit earned on `pair` at `benefit_percent` under `mode`.
    fn compute_benefit(
        &self,
        pair: &EnteredPair,
        benefit_percent: f64,
        mode: CalculationMode,
        limits: &AmountLimits,
        gold_rate: f64,
    ) -> BenefitPayout;

    /// Bound currently touched by the entered values, if any.
    fn limit_signal(
        &self,
        pair: &EnteredPair,
        limits: &AmountLimits,
        gold_rate: f64,
    ) -> Option<LimitSignal>;

    /// Run the full pipeline for one input snapshot.
    ///
    /// Default implementation chains the other methods.
    fn calculate(&self, input: &CalculationInput) -> CalculationOutput {
        let pair = self.resolve_entered_pair(input.source, &input.limits, input.gold_rate);
        let payout = self.compute_benefit(
            &pair,
            input.benefit_percent,
            input.mode,
            &input.limits,
            input.gold_rate,
        );
        CalculationOutput {
            entered_amount: pair.entered_amount,
            entered_weight: pair.entered_weight,
            benefit_amount: payout.benefit_amount,
            benefit_weight: payout.benefit_weight,
            you_get_amount: pair.entered_amount + payout.benefit_amount,
            you_get_weight: pair.entered_weight + payout.benefit_weight,
            benefit_percent: input.benefit_percent,
            limit: self.limit_signal(&pair, &input.limits, input.gold_rate),
        }
    }
}
