//! # Jetting Equations
//!
//! The physical model behind every recommendation, kept in one place so it
//! can be checked against the tuning document line by line.
//!
//! ## Modules
//!
//! - [`air_density`] - Moist air density (ideal gas + Tetens vapour pressure)
//! - [`jet_scaling`] - Density ratio and the fourth-root jet scaling law
//!
//! ## Numeric Conventions
//!
//! - Double precision throughout
//! - No rounding here; discrete values are chosen by the recommendation stage

pub mod air_density;
pub mod jet_scaling;

pub use air_density::{
    air_density,
    dew_point,
    moist_air_density,
    saturation_vapor_pressure,
    vapor_partial_pressure,
    GAS_CONSTANT_DRY_AIR,
};

pub use jet_scaling::{density_ratio, scaled_jet, JET_SCALING_EXPONENT};
