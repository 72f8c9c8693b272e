//! Error types for the Aurum calculator.
//!
//! The benefit calculator itself never fails: out-of-range inputs are
//! clamped. These errors cover the edges around it (limit construction,
//! text entry, submission).
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LimitsError {
    #[error("amount limits must be finite: min {min}, max {max}")] NonFinite { min: f64, max: f64 },
    #[error("amount limits must be non-negative: min {0}")] Negative(f64),
    #[error("minimum amount {min} is not below maximum {max}")] InvertedRange { min: f64, max: f64 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("empty input")] Empty,
    #[error("unparseable number: {0}")] Unparseable(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmissionError {
    #[error("please enter an amount")] AmountRequired,
    #[error("amount {amount} is below the minimum of {min}")] BelowMinimum { amount: f64, min: f64 },
    #[error("amount {amount} is above the maximum of {max}")] AboveMaximum { amount: f64, max: f64 },
    #[error("gold rate unavailable")] RateUnavailable,
}
