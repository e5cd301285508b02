//! # Main Jet Scaling
//!
//! Fuel flow through a jet scales with the square root of the pressure drop,
//! airflow with the square root of air density. Holding the mixture constant
//! gives the fourth-root law used by kart tuning sheets:
//!
//! ```text
//! j₂ = j₁ × (ρ₂ / ρ₁)^(1/4)
//! ```
//!
//! Denser air (ratio > 1) needs a bigger jet, thinner air a smaller one.
//!
//! ## Notation
//!
//! - `j₁` = Reference jet (known good at reference conditions)
//! - `j₂` = Raw (continuous) recommended jet
//! - `ρ₁` = Reference air density
//! - `ρ₂` = Current air density

use crate::errors::{JetError, JetResult};
use crate::units::KgPerM3;

/// Exponent of the density ratio in the jet scaling law
pub const JET_SCALING_EXPONENT: f64 = 0.25;

/// Density ratio ρ₂ / ρ₁
///
/// # Errors
///
/// `JetError::Computation` when the reference density is zero, negative or
/// not finite, or when the ratio itself is not a positive finite number.
pub fn density_ratio(current: KgPerM3, reference: KgPerM3) -> JetResult<f64> {
    if !reference.0.is_finite() || reference.0 <= 0.0 {
        return Err(JetError::computation(
            "jet scaling",
            format!("reference air density {} kg/m³ must be positive", reference.0),
        ));
    }

    let ratio = current.0 / reference.0;
    if !ratio.is_finite() || ratio <= 0.0 {
        return Err(JetError::computation(
            "jet scaling",
            format!("density ratio {ratio} must be positive"),
        ));
    }

    Ok(ratio)
}

/// Raw jet size j₂ = j₁ × ratio^(1/4)
///
/// # Example
///
/// ```rust
/// use jet_core::equations::scaled_jet;
///
/// assert_eq!(scaled_jet(175, 1.0), 175.0);
/// assert!(scaled_jet(130, 1.1) > 130.0);
/// ```
#[inline]
pub fn scaled_jet(reference_jet: u32, ratio: f64) -> f64 {
    reference_jet as f64 * ratio.powf(JET_SCALING_EXPONENT)
}
