//! # aurum-benefit — Tiered benefit calculator.
//!
//! Maps a contribution (entered as an amount or as a gold weight) onto a
//! 1–330 day scale and a five-row benefit table:
//! - **Conversion**: amount and weight are interchangeable through the gold
//!   rate; only the maximum amount is enforced while editing.
//! - **Tier lookup**: half-open `[min, max)` day ranges, with day 330 pinned
//!   to the last row.
//! - **Benefit modes**: `today` applies one flat rate; `total` sums day by
//!   day, paying the base rate before the selected tier's first day.
//! - **Session**: screen-level state that turns keystrokes, taps and slider
//!   drags into calculator inputs.

pub mod conversion;
pub mod engine;
pub mod session;
pub mod tiers;

pub use conversion::{amount_to_weight, resolve_entered_pair, weight_to_amount};
pub use engine::BenefitEngine;
pub use session::{CalculatorSession, SessionSettings};
pub use tiers::{amount_to_day, range_for_percent, segment_start_day, select_range_for_day};
