//! Submission checks run when the user confirms a contribution.
//!
//! While editing, only the maximum is enforced (by clamping). The minimum is
//! checked here, once, so intermediate values below it display without
//! error.

use crate::error::SubmissionError;
use crate::types::AmountLimits;

/// Check that `amount` may be submitted at `gold_rate`.
pub fn validate_submission(
    amount: f64,
    limits: &AmountLimits,
    gold_rate: f64,
) -> Result<(), SubmissionError> {
    if !gold_rate.is_finite() || gold_rate <= 0.0 {
        return Err(SubmissionError::RateUnavailable);
    }
    if amount.is_nan() || amount <= 0.0 {
        return Err(SubmissionError::AmountRequired);
    }
    if amount < limits.min_amount() {
        return Err(SubmissionError::BelowMinimum {
            amount,
            min: limits.min_amount(),
        });
    }
    if amount > limits.max_amount() {
        return Err(SubmissionError::AboveMaximum {
            amount,
            max: limits.max_amount(),
        });
    }
    Ok(())
}
