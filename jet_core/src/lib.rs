//! # jet_core - Kart Carburetor Jetting Engine
//!
//! `jet_core` is the computational heart of Jetwise. It recommends main jet,
//! needle clip position, float level and needle for Rotax MAX kart engines by
//! scaling a known-good jet with the change in air density. All inputs and
//! outputs are JSON-serializable, so any front end (CLI, web handler) can sit
//! on top of it.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: `calculate` is a pure function of its request
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Table-Driven**: Engine data lives in constant records, not code paths
//!
//! ## Quick Start
//!
//! ```rust
//! use jet_core::{calculate, CalculationRequest, EngineProfile, EnvironmentalConditions};
//!
//! let today = EnvironmentalConditions::new(35.0, 1000.0, 80.0);
//! let baseline = EnvironmentalConditions::new(20.0, 1013.25, 50.0);
//!
//! let request = CalculationRequest::new(today, EngineProfile::SeniorMaxEvo)
//!     .with_reference(baseline)
//!     .with_reference_jet(175);
//!
//! let result = calculate(&request).unwrap();
//! assert_eq!(result.recommendations.main_jet, 172);
//!
//! // Serialize to JSON for storage or transmission
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Request/result types, recommendations and warnings
//! - [`conditions`] - Environmental conditions value type
//! - [`engines`] - Engine profiles, jet size tables and lookup bands
//! - [`equations`] - Air density and jet scaling formulas
//! - [`validation`] - Input limits and the JSON request adapter
//! - [`logbook`] - Saved settings container
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - File operations with atomic saves and locking

pub mod calculations;
pub mod conditions;
pub mod engines;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod logbook;
pub mod units;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, CalculationRequest, CalculationResult, Warning, WarningCode};
pub use conditions::EnvironmentalConditions;
pub use engines::EngineProfile;
pub use errors::{JetError, JetResult};
pub use file_io::{load_logbook, save_logbook, update_logbook, LogbookLock};
pub use logbook::{Logbook, SavedSetting};
pub use validation::request_from_json;
