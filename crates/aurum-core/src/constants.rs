//! Calculator constants. Amounts are in currency units, weights in grams.

use crate::types::BenefitRange;

/// First position on the day scale.
pub const MIN_DAY: u32 = 1;

/// Last position on the day scale.
///
/// Belongs to the final benefit range even though it equals that range's
/// exclusive `max`.
pub const MAX_DAY: u32 = 330;

/// Day value meaning "no position" (nothing entered yet).
pub const NO_DAY: u32 = 0;

/// Tolerance used when matching a benefit percentage against the table.
pub const PERCENT_MATCH_TOLERANCE: f64 = 0.1;

/// Maximum number of fractional digits accepted in weight entry.
pub const WEIGHT_DECIMALS: usize = 3;

/// Tiered benefit table, ordered by `min` and contiguous over `1..=330`.
///
/// | days      | benefit |
/// |-----------|---------|
/// | 1 – 75    | 5.00 %  |
/// | 76 – 150  | 3.75 %  |
/// | 151 – 225 | 2.00 %  |
/// | 226 – 300 | 0.75 %  |
/// | 301 – 330 | 0.00 %  |
pub static BENEFIT_RANGES: [BenefitRange; 5] = [
    BenefitRange { min: 1, max: 76, percentage: 5.0 },
    BenefitRange { min: 76, max: 151, percentage: 3.75 },
    BenefitRange { min: 151, max: 226, percentage: 2.0 },
    BenefitRange { min: 226, max: 301, percentage: 0.75 },
    BenefitRange { min: 301, max: 330, percentage: 0.0 },
];

/// Base benefit rate applied before the cutoff day in total mode.
///
/// Equal to the first row of [`BENEFIT_RANGES`].
pub const BASE_BENEFIT_PERCENT: f64 = 5.0;
