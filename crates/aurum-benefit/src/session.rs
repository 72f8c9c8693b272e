//! Screen-level calculator state.
//!
//! A [`CalculatorSession`] owns the two text fields, the last-edited marker,
//! the selected benefit percentage and the externally supplied rate and
//! limits. Every event mutates that state and drops the memoized output;
//! [`CalculatorSession::output`] recomputes it on demand.
//!
//! Choosing a segment (tap or slider drag) only changes the benefit
//! percentage. Editing amount or weight never moves the slider.

use tracing::debug;

use aurum_core::constants::{BASE_BENEFIT_PERCENT, BENEFIT_RANGES};
use aurum_core::error::SubmissionError;
use aurum_core::input::{
    floor_weight, format_amount, format_weight, parse_amount, parse_weight, sanitize_amount_text,
    sanitize_weight_text,
};
use aurum_core::traits::BenefitCalculator;
use aurum_core::types::{
    AmountLimits, BenefitRange, CalculationInput, CalculationMode, CalculationOutput, EnteredPair,
    Field, Source,
};
use aurum_core::validation::validate_submission;

use crate::engine::BenefitEngine;
use crate::tiers;

/// Tunables for the step buttons and quick-select chips.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    /// Currency units added or removed per amount step.
    pub amount_step: f64,
    /// Grams added or removed per weight step.
    pub weight_step: f64,
    /// Preset amounts offered for one-tap entry.
    pub quick_amounts: Vec<f64>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            amount_step: 100.0,
            weight_step: 0.1,
            quick_amounts: vec![500.0, 1_000.0, 2_000.0, 5_000.0],
        }
    }
}

/// Mutable state behind the payment calculator screen.
#[derive(Debug, Clone)]
pub struct CalculatorSession<C: BenefitCalculator = BenefitEngine> {
    calculator: C,
    settings: SessionSettings,
    amount_text: String,
    weight_text: String,
    last_changed: Option<Field>,
    benefit_percent: f64,
    mode: CalculationMode,
    gold_rate: f64,
    limits: AmountLimits,
    cached: Option<CalculationOutput>,
}

impl CalculatorSession<BenefitEngine> {
    /// Session backed by the production engine and default settings.
    pub fn new(limits: AmountLimits, gold_rate: f64) -> Self {
        Self::with_calculator(BenefitEngine::new(), limits, gold_rate, SessionSettings::default())
    }
}

impl<C: BenefitCalculator> CalculatorSession<C> {
    pub fn with_calculator(
        calculator: C,
        limits: AmountLimits,
        gold_rate: f64,
        settings: SessionSettings,
    ) -> Self {
        Self {
            calculator,
            settings,
            amount_text: String::new(),
            weight_text: String::new(),
            last_changed: None,
            benefit_percent: BASE_BENEFIT_PERCENT,
            mode: CalculationMode::default(),
            gold_rate,
            limits,
            cached: None,
        }
    }

    // --- accessors ---

    pub fn amount_text(&self) -> &str {
        &self.amount_text
    }

    pub fn weight_text(&self) -> &str {
        &self.weight_text
    }

    pub fn last_changed(&self) -> Option<Field> {
        self.last_changed
    }

    pub fn benefit_percent(&self) -> f64 {
        self.benefit_percent
    }

    pub fn mode(&self) -> CalculationMode {
        self.mode
    }

    pub fn gold_rate(&self) -> f64 {
        self.gold_rate
    }

    pub fn limits(&self) -> &AmountLimits {
        &self.limits
    }

    pub fn quick_amounts(&self) -> &[f64] {
        &self.settings.quick_amounts
    }

    /// Amount field as a number; empty text reads as 0.
    pub fn amount(&self) -> f64 {
        parse_amount(&self.amount_text).unwrap_or(0.0)
    }

    /// Weight field as a number; empty text reads as 0.
    pub fn weight(&self) -> f64 {
        parse_weight(&self.weight_text).unwrap_or(0.0)
    }

    /// Slider position: first day of the selected segment.
    pub fn slider_day(&self) -> u32 {
        tiers::segment_start_day(self.benefit_percent)
    }

    // --- text entry ---

    /// Amount typed by the user. Non-digits are dropped and the value is
    /// capped at the maximum amount.
    pub fn enter_amount_text(&mut self, raw: &str) {
        self.amount_text = sanitize_amount_text(raw);
        self.last_changed = Some(Field::Amount);
        self.sync_fields();
        debug!(amount = %self.amount_text, "amount entered");
    }

    /// Weight typed by the user. One decimal point, at most three decimals,
    /// capped at the weight the maximum amount buys.
    pub fn enter_weight_text(&mut self, raw: &str) {
        self.weight_text = sanitize_weight_text(raw);
        self.last_changed = Some(Field::Weight);
        self.sync_fields();
        debug!(weight = %self.weight_text, "weight entered");
    }

    // --- step buttons and presets ---

    pub fn increment_amount(&mut self) {
        let next = (self.amount() + self.settings.amount_step).min(self.limits.max_amount());
        self.set_amount(next);
    }

    pub fn decrement_amount(&mut self) {
        let next = (self.amount() - self.settings.amount_step).max(0.0);
        self.set_amount(next);
    }

    pub fn increment_weight(&mut self) {
        let max_weight = self.limits.max_weight(self.gold_rate);
        let next = (self.weight() + self.settings.weight_step).min(max_weight);
        self.set_weight(next);
    }

    pub fn decrement_weight(&mut self) {
        let next = (self.weight() - self.settings.weight_step).max(0.0);
        self.set_weight(next);
    }

    /// One-tap preset amount, capped at the maximum.
    pub fn quick_select(&mut self, amount: f64) {
        self.set_amount(amount.clamp(0.0, self.limits.max_amount()));
    }

    fn set_amount(&mut self, amount: f64) {
        self.amount_text = format_amount(amount);
        self.last_changed = Some(Field::Amount);
        self.sync_fields();
        debug!(amount = %self.amount_text, "amount stepped");
    }

    fn set_weight(&mut self, weight: f64) {
        self.weight_text = format_weight(weight);
        self.last_changed = Some(Field::Weight);
        self.sync_fields();
        debug!(weight = %self.weight_text, "weight stepped");
    }

    // --- benefit selection ---

    /// Tap on segment `index` of the benefit bar.
    ///
    /// Returns the selected range, or `None` (and changes nothing) for an
    /// index past the table.
    pub fn select_segment(&mut self, index: usize) -> Option<&'static BenefitRange> {
        let range = BENEFIT_RANGES.get(index)?;
        self.set_benefit_percent(range.percentage);
        Some(range)
    }

    /// Slider released at `day`.
    pub fn select_day(&mut self, day: i64) -> &'static BenefitRange {
        let range = tiers::select_range_for_day(day);
        self.set_benefit_percent(range.percentage);
        range
    }

    /// Set the benefit percentage directly. Non-finite values are ignored.
    pub fn set_benefit_percent(&mut self, percent: f64) {
        if !percent.is_finite() {
            return;
        }
        self.benefit_percent = percent;
        debug!(percent, "benefit percent selected");
        self.invalidate();
    }

    pub fn set_mode(&mut self, mode: CalculationMode) {
        self.mode = mode;
        debug!(%mode, "calculation mode changed");
        self.invalidate();
    }

    // --- external inputs ---

    /// Fresh gold rate. The edited field is re-capped and the other one
    /// re-derived from it.
    pub fn update_gold_rate(&mut self, gold_rate: f64) {
        self.gold_rate = gold_rate;
        debug!(gold_rate, "gold rate updated");
        self.sync_fields();
    }

    pub fn update_limits(&mut self, limits: AmountLimits) {
        self.limits = limits;
        debug!(
            min_amount = limits.min_amount(),
            max_amount = limits.max_amount(),
            "amount limits updated"
        );
        self.sync_fields();
    }

    /// Clear both fields and restore the default benefit selection.
    pub fn reset(&mut self) {
        self.amount_text.clear();
        self.weight_text.clear();
        self.last_changed = None;
        self.benefit_percent = BASE_BENEFIT_PERCENT;
        debug!("session reset");
        self.invalidate();
    }

    // --- evaluation ---

    /// Snapshot of the current calculator inputs.
    pub fn input(&self) -> CalculationInput {
        CalculationInput {
            source: Source::from_fields(self.weight(), self.amount(), self.last_changed),
            gold_rate: self.gold_rate,
            limits: self.limits,
            benefit_percent: self.benefit_percent,
            mode: self.mode,
        }
    }

    /// Current display values, recomputed only after a state change.
    pub fn output(&mut self) -> CalculationOutput {
        if let Some(cached) = self.cached {
            return cached;
        }
        let input = self.input();
        debug!(
            field = ?input.source.map(|s| s.field()),
            value = input.source.map_or(0.0, |s| s.value()),
            mode = %input.mode,
            "recomputing output"
        );
        let output = self.calculator.calculate(&input);
        self.cached = Some(output);
        output
    }

    /// The "Continue" action: check the minimum and hand back the pair.
    pub fn submit(&mut self) -> Result<EnteredPair, SubmissionError> {
        let output = self.output();
        validate_submission(output.entered_amount, &self.limits, self.gold_rate)?;
        Ok(EnteredPair {
            entered_amount: output.entered_amount,
            entered_weight: output.entered_weight,
        })
    }

    /// Cap the field the user edited at the current maximum, then rewrite
    /// the other field from it. Both texts stay within `[0, max]`.
    fn sync_fields(&mut self) {
        let max_amount = self.limits.max_amount().floor();
        let max_weight = self.limits.max_weight(self.gold_rate);

        match self.last_changed {
            Some(Field::Amount) => {
                if self.amount() > max_amount {
                    self.amount_text = format_amount(max_amount);
                }
                let amount = self.amount();
                self.weight_text = if amount > 0.0 {
                    let weight = self.calculator.amount_to_weight(amount, self.gold_rate);
                    weight_text_within(weight, max_weight)
                } else {
                    String::new()
                };
            }
            Some(Field::Weight) => {
                if max_weight > 0.0 && self.weight() > max_weight {
                    self.weight_text = format_weight(floor_weight(max_weight));
                }
                let weight = self.weight();
                self.amount_text = if weight > 0.0 {
                    let amount = self.calculator.weight_to_amount(weight, self.gold_rate);
                    format_amount(amount.min(max_amount))
                } else {
                    String::new()
                };
            }
            None => {}
        }
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.cached = None;
    }
}

/// Display text for a derived weight that never reads back above `max_weight`.
///
/// Rounding to three decimals can carry a value just under the cap past it;
/// such values are truncated instead.
fn weight_text_within(weight: f64, max_weight: f64) -> String {
    let text = format_weight(weight);
    if max_weight > 0.0 && parse_weight(&text).unwrap_or(0.0) > max_weight {
        return format_weight(floor_weight(max_weight));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurum_core::types::LimitSignal;

    const RATE: f64 = 6_500.0;

    fn session() -> CalculatorSession {
        CalculatorSession::new(AmountLimits::new(100.0, 100_000.0).unwrap(), RATE)
    }

    #[test]
    fn starts_empty_at_base_rate() {
        let mut s = session();
        assert_eq!(s.amount_text(), "");
        assert_eq!(s.benefit_percent(), 5.0);
        assert_eq!(s.slider_day(), 1);
        let out = s.output();
        assert_eq!(out.entered_amount, 0.0);
        assert_eq!(out.limit, Some(LimitSignal::Min));
    }

    #[test]
    fn amount_entry_mirrors_weight() {
        let mut s = session();
        s.enter_amount_text("3,250");
        assert_eq!(s.amount_text(), "3250");
        assert_eq!(s.weight_text(), "0.500");
        assert_eq!(s.last_changed(), Some(Field::Amount));
    }

    #[test]
    fn weight_entry_mirrors_amount() {
        let mut s = session();
        s.enter_weight_text("1.23456");
        assert_eq!(s.weight_text(), "1.234");
        assert_eq!(s.amount_text(), "8021");
        let out = s.output();
        assert_eq!(out.entered_weight, 1.234);
    }

    #[test]
    fn amount_above_max_is_capped() {
        let mut s = session();
        s.enter_amount_text("101000");
        assert_eq!(s.amount_text(), "100000");
        let out = s.output();
        assert_eq!(out.entered_amount, 100_000.0);
        assert_eq!(out.limit, Some(LimitSignal::Max));
    }

    #[test]
    fn clearing_amount_clears_weight() {
        let mut s = session();
        s.enter_amount_text("500");
        s.enter_amount_text("");
        assert_eq!(s.weight_text(), "");
        assert_eq!(s.output().entered_amount, 0.0);
    }

    #[test]
    fn segment_tap_keeps_entered_pair() {
        let mut s = session();
        s.enter_amount_text("12000");
        let before = s.output();
        let range = s.select_segment(2).unwrap();
        assert_eq!(range.percentage, 2.0);
        let after = s.output();
        assert_eq!(after.entered_amount, before.entered_amount);
        assert_eq!(after.entered_weight, before.entered_weight);
        assert_eq!(s.amount_text(), "12000");
        assert_eq!(s.last_changed(), Some(Field::Amount));
        assert_eq!(after.benefit_amount, 240.0);
        assert_eq!(s.slider_day(), 151);
    }

    #[test]
    fn segment_index_past_table_is_ignored() {
        let mut s = session();
        assert!(s.select_segment(5).is_none());
        assert_eq!(s.benefit_percent(), 5.0);
    }

    #[test]
    fn slider_drag_selects_by_day() {
        let mut s = session();
        assert_eq!(s.select_day(330).percentage, 0.0);
        assert_eq!(s.benefit_percent(), 0.0);
        assert_eq!(s.select_day(76).percentage, 3.75);
        assert_eq!(s.slider_day(), 76);
    }

    #[test]
    fn steps_stay_within_bounds() {
        let mut s = session();
        s.decrement_amount();
        assert_eq!(s.amount_text(), "0");
        s.increment_amount();
        s.increment_amount();
        assert_eq!(s.amount_text(), "200");
        s.quick_select(250_000.0);
        assert_eq!(s.amount_text(), "100000");
        s.increment_amount();
        assert_eq!(s.amount_text(), "100000");
    }

    #[test]
    fn weight_steps() {
        let mut s = session();
        s.increment_weight();
        assert_eq!(s.weight_text(), "0.100");
        assert_eq!(s.amount_text(), "650");
        s.decrement_weight();
        s.decrement_weight();
        assert_eq!(s.weight_text(), "0.000");
        assert_eq!(s.amount_text(), "");
    }

    #[test]
    fn mode_switch_recomputes() {
        let mut s = session();
        s.quick_select(100.0);
        s.set_mode(CalculationMode::Total);
        assert_eq!(s.output().benefit_amount, 5.0);
    }

    #[test]
    fn rate_refresh_rederives_other_field() {
        let mut s = session();
        s.enter_amount_text("6500");
        assert_eq!(s.weight_text(), "1.000");
        s.update_gold_rate(13_000.0);
        assert_eq!(s.amount_text(), "6500");
        assert_eq!(s.weight_text(), "0.500");
    }

    #[test]
    fn output_is_memoized_until_change() {
        let mut s = session();
        s.enter_amount_text("1000");
        let first = s.output();
        assert_eq!(s.output(), first);
        s.set_benefit_percent(0.75);
        assert_ne!(s.output(), first);
    }

    #[test]
    fn non_finite_percent_ignored() {
        let mut s = session();
        s.set_benefit_percent(f64::NAN);
        assert_eq!(s.benefit_percent(), 5.0);
    }

    #[test]
    fn submit_rejects_below_minimum() {
        let mut s = session();
        s.enter_amount_text("50");
        assert_eq!(
            s.submit(),
            Err(SubmissionError::BelowMinimum { amount: 50.0, min: 100.0 })
        );
        s.enter_amount_text("150");
        let pair = s.submit().unwrap();
        assert_eq!(pair.entered_amount, 150.0);
    }

    #[test]
    fn submit_requires_amount() {
        let mut s = session();
        assert_eq!(s.submit(), Err(SubmissionError::AmountRequired));
    }

    #[test]
    fn reset_clears_state() {
        let mut s = session();
        s.enter_amount_text("700");
        s.select_segment(3);
        s.reset();
        assert_eq!(s.amount_text(), "");
        assert_eq!(s.weight_text(), "");
        assert_eq!(s.last_changed(), None);
        assert_eq!(s.benefit_percent(), 5.0);
    }

    #[test]
    fn update_limits_applies_new_cap() {
        let mut s = session();
        s.enter_amount_text("90000");
        s.update_limits(AmountLimits::new(100.0, 50_000.0).unwrap());
        assert_eq!(s.amount_text(), "50000");
        assert_eq!(s.output().entered_amount, 50_000.0);
        assert!(s.weight() <= s.limits().max_weight(RATE));
    }

    #[test]
    fn update_limits_recaps_weight_source() {
        let mut s = session();
        s.enter_weight_text("10");
        s.update_limits(AmountLimits::new(100.0, 50_000.0).unwrap());
        // 50_000 / 6_500 = 7.6923…, truncated.
        assert_eq!(s.weight_text(), "7.692");
        assert_eq!(s.amount_text(), "49998");
        assert!(s.amount() <= 50_000.0);
    }

    #[test]
    fn weight_above_max_truncates_to_cap() {
        let mut s = session();
        s.enter_weight_text("99");
        assert_eq!(s.weight_text(), "15.384");
        assert_eq!(s.amount_text(), "99996");
        assert!(s.amount() <= 100_000.0);
        assert!(s.weight() <= s.limits().max_weight(RATE));
        let out = s.output();
        assert_eq!(out.entered_weight, 15.384);
        assert_eq!(s.amount(), out.entered_amount);
    }

    #[test]
    fn weight_steps_stop_below_cap() {
        let mut s = session();
        s.enter_weight_text("99");
        for _ in 0..200 {
            s.increment_weight();
        }
        assert_eq!(s.weight_text(), "15.384");
        assert_eq!(s.amount_text(), "99996");
        assert!(s.amount() <= 100_000.0);
    }

    #[test]
    fn max_amount_mirrors_weight_within_cap() {
        let mut s = session();
        s.enter_amount_text("100000");
        assert_eq!(s.weight_text(), "15.384");
        assert!(s.weight() <= s.limits().max_weight(RATE));
    }

    #[test]
    fn rate_rise_recaps_weight_source() {
        let mut s = session();
        s.enter_weight_text("10");
        assert_eq!(s.amount_text(), "65000");
        s.update_gold_rate(13_000.0);
        // 100_000 / 13_000 = 7.6923…
        assert_eq!(s.weight_text(), "7.692");
        assert_eq!(s.amount_text(), "99996");
        assert!(s.amount() <= 100_000.0);
        assert_eq!(s.output().entered_amount, 99_996.0);
    }

    #[test]
    fn default_settings() {
        let s = session();
        assert_eq!(s.quick_amounts(), &[500.0, 1_000.0, 2_000.0, 5_000.0]);
    }
}
