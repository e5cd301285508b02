//! # Jetting Calculations
//!
//! The calculation follows the same pattern as every calc type:
//!
//! - [`CalculationRequest`] - Input parameters (JSON-serializable)
//! - [`CalculationResult`] - Calculation results (JSON-serializable)
//! - [`calculate`] - Pure calculation function returning `JetResult`
//!
//! ## Modules
//!
//! - [`jetting`] - Request/result types and the `calculate` entry point
//! - [`recommendations`] - Snapping and band lookups for discrete settings
//! - [`warnings`] - Advisory warnings attached to results

pub mod jetting;
pub mod recommendations;
pub mod warnings;

// Re-export commonly used types
pub use jetting::{calculate, CalculationRequest, CalculationResult, DensityCalculations, ResolvedInputs};
pub use recommendations::Recommendations;
pub use warnings::{Warning, WarningCode, ENVELOPE_THRESHOLD};
