//! # aurum-core
//! Foundation types and traits for the Aurum gold-savings calculator.

pub mod constants;
pub mod error;
pub mod input;
pub mod traits;
pub mod types;
pub mod validation;
