//! # Jetting Calculation
//!
//! Recommends main jet, needle clip, float level and needle for the current
//! air, scaled from a jet known to work at reference conditions.
//!
//! ## Pipeline
//!
//! 1. Validate the request (hard physical limits)
//! 2. Resolve defaults (reference conditions and jet from the engine profile)
//! 3. Air density for current and reference conditions
//! 4. Density ratio and raw jet `j₂ = j₁ × (ρ₂/ρ₁)^(1/4)`
//! 5. Snap to a stocked jet, pick clip/float/needle, attach warnings
//!
//! ## Example
//!
//! ```rust
//! use jet_core::calculations::jetting::{calculate, CalculationRequest};
//! use jet_core::conditions::EnvironmentalConditions;
//! use jet_core::engines::EngineProfile;
//!
//! let today = EnvironmentalConditions::new(20.0, 1013.25, 50.0);
//! let request = CalculationRequest::new(today, EngineProfile::SeniorMaxEvo)
//!     .with_reference(today)
//!     .with_reference_jet(175);
//!
//! let result = calculate(&request).unwrap();
//! assert_eq!(result.recommendations.main_jet, 175);
//! assert!(result.warnings.is_empty());
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::recommendations::{assemble, Recommendations};
use super::warnings::{condition_warnings, Warning, WarningCode};
use crate::conditions::EnvironmentalConditions;
use crate::engines::EngineProfile;
use crate::equations::{air_density, density_ratio, scaled_jet};
use crate::errors::{JetError, JetResult};
use crate::validation::validate_request;

/// Input for a jetting calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "current": { "temperature_c": 35.0, "pressure_hpa": 1000.0, "humidity_pct": 80.0, "altitude_m": 120.0 },
///   "reference": { "temperature_c": 20.0, "pressure_hpa": 1013.25, "humidity_pct": 50.0, "altitude_m": 0.0 },
///   "engine": "Senior MAX EVO",
///   "reference_jet": 175
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Conditions right now
    pub current: EnvironmentalConditions,

    /// Baseline of the known-good jet; engine default when `None`
    #[serde(default)]
    pub reference: Option<EnvironmentalConditions>,

    /// Engine profile
    pub engine: EngineProfile,

    /// Known-good jet at the reference; engine default when `None`
    #[serde(default)]
    pub reference_jet: Option<u32>,
}

impl CalculationRequest {
    /// Request with profile defaults for reference conditions and jet.
    pub fn new(current: EnvironmentalConditions, engine: EngineProfile) -> Self {
        CalculationRequest {
            current,
            reference: None,
            engine,
            reference_jet: None,
        }
    }

    pub fn with_reference(mut self, reference: EnvironmentalConditions) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn with_reference_jet(mut self, reference_jet: u32) -> Self {
        self.reference_jet = Some(reference_jet);
        self
    }

    /// Fill in engine defaults for anything left unset.
    pub fn resolve(&self) -> ResolvedInputs {
        let spec = self.engine.spec();
        ResolvedInputs {
            current: self.current,
            reference: self.reference.unwrap_or(spec.default_reference),
            engine: self.engine,
            reference_jet: self.reference_jet.unwrap_or(spec.default_reference_jet),
        }
    }
}

/// The request as actually computed, defaults filled in.
///
/// Echoed in the result so the presentation layer can show the baseline
/// and the (informational) altitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedInputs {
    pub current: EnvironmentalConditions,
    pub reference: EnvironmentalConditions,
    pub engine: EngineProfile,
    pub reference_jet: u32,
}

/// Intermediate values of the physical model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityCalculations {
    /// Current air density (kg/m³)
    pub current_air_density: f64,
    /// Reference air density (kg/m³)
    pub reference_air_density: f64,
    /// current / reference, always > 0
    pub density_ratio: f64,
    /// Continuous jet size before snapping
    pub raw_main_jet: f64,
}

/// Results from a jetting calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "inputs": { "...": "resolved request" },
///   "recommendations": { "main_jet": 172, "needle_position": 2, "float_height_mm": 15.2, "needle_type": "K98" },
///   "calculations": { "current_air_density": 1.1113, "reference_air_density": 1.1989, "density_ratio": 0.927, "raw_main_jet": 171.71 },
///   "warnings": [ { "code": "outside_calibration_envelope", "message": "..." } ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub inputs: ResolvedInputs,
    pub recommendations: Recommendations,
    pub calculations: DensityCalculations,
    pub warnings: Vec<Warning>,
}

impl CalculationResult {
    /// Check if any advisory was raised
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check for a specific advisory
    pub fn has_warning(&self, code: WarningCode) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }
}

/// Calculate jetting recommendations.
///
/// Pure function of the request: no I/O, no clock, no shared state.
///
/// # Arguments
///
/// * `request` - Current conditions, engine and optional reference baseline
///
/// # Returns
///
/// * `Ok(CalculationResult)` - Fully populated recommendations plus warnings
/// * `Err(JetError)` - Validation error for bad input, computation error if
///   the physical model produced a non-physical value
pub fn calculate(request: &CalculationRequest) -> JetResult<CalculationResult> {
    validate_request(request)?;

    let inputs = request.resolve();
    let spec = inputs.engine.spec();

    let current_density = air_density(&inputs.current)?;
    let reference_density = air_density(&inputs.reference)?;
    let ratio = density_ratio(current_density, reference_density)?;
    let raw_jet = scaled_jet(inputs.reference_jet, ratio);

    if !raw_jet.is_finite() {
        return Err(JetError::computation(
            "jet scaling",
            format!("raw jet {raw_jet} is not finite"),
        ));
    }

    debug!(
        engine = %inputs.engine,
        current_density = current_density.0,
        reference_density = reference_density.0,
        density_ratio = ratio,
        raw_jet,
        "computed jet scaling"
    );

    let mut warnings = condition_warnings(&inputs.current);
    let (recommendations, model_warnings) = assemble(spec, inputs.reference_jet, raw_jet, ratio);
    warnings.extend(model_warnings);

    debug!(
        main_jet = recommendations.main_jet,
        needle_position = recommendations.needle_position,
        warnings = warnings.len(),
        "assembled recommendation"
    );

    Ok(CalculationResult {
        inputs,
        recommendations,
        calculations: DensityCalculations {
            current_air_density: current_density.0,
            reference_air_density: reference_density.0,
            density_ratio: ratio,
            raw_main_jet: raw_jet,
        },
        warnings,
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::validation::{HUMIDITY_LIMITS_PCT, PRESSURE_LIMITS_HPA, TEMPERATURE_LIMITS_C};
    use proptest::prelude::*;

    fn conditions() -> impl Strategy<Value = EnvironmentalConditions> {
        (
            TEMPERATURE_LIMITS_C.0..=TEMPERATURE_LIMITS_C.1,
            PRESSURE_LIMITS_HPA.0..=PRESSURE_LIMITS_HPA.1,
            HUMIDITY_LIMITS_PCT.0..=HUMIDITY_LIMITS_PCT.1,
        )
            .prop_map(|(t, p, h)| EnvironmentalConditions::new(t, p, h))
    }

    fn engine() -> impl Strategy<Value = EngineProfile> {
        prop::sample::select(EngineProfile::ALL.to_vec())
    }

    /// An engine with one of its stocked jets
    fn engine_and_jet() -> impl Strategy<Value = (EngineProfile, u32)> {
        engine().prop_flat_map(|engine| (Just(engine), prop::sample::select(engine.spec().jet_sizes.sizes())))
    }

    proptest! {
        /// Property: the same request always gives the same result.
        #[test]
        fn prop_deterministic(current in conditions(), reference in conditions(), (engine, jet) in engine_and_jet()) {
            let request = CalculationRequest::new(current, engine)
                .with_reference(reference)
                .with_reference_jet(jet);
            prop_assert_eq!(calculate(&request).unwrap(), calculate(&request).unwrap());
        }

        /// Property: identical current and reference air keeps any stocked reference jet.
        #[test]
        fn prop_identity_keeps_reference_jet(air in conditions(), (engine, jet) in engine_and_jet()) {
            let request = CalculationRequest::new(air, engine)
                .with_reference(air)
                .with_reference_jet(jet);
            let result = calculate(&request).unwrap();

            prop_assert_eq!(result.calculations.density_ratio, 1.0);
            prop_assert_eq!(result.recommendations.main_jet, jet);
            prop_assert!(!result.has_warning(WarningCode::OutsideCalibrationEnvelope));
            prop_assert!(!result.has_warning(WarningCode::JetClamped));
        }

        /// Property: densities and ratio stay positive over the whole accepted domain.
        #[test]
        fn prop_density_positive(current in conditions(), reference in conditions()) {
            let result = calculate(
                &CalculationRequest::new(current, EngineProfile::SeniorMaxEvo).with_reference(reference),
            )
            .unwrap();
            prop_assert!(result.calculations.current_air_density > 0.0);
            prop_assert!(result.calculations.reference_air_density > 0.0);
            prop_assert!(result.calculations.density_ratio > 0.0);
        }

        /// Property: raising current pressure (all else equal) raises the density ratio
        /// and the raw jet, and never lowers the stocked jet.
        #[test]
        fn prop_ratio_increases_with_pressure(
            current in conditions(),
            delta in 1.0f64..200.0,
        ) {
            prop_assume!(current.pressure_hpa + delta <= PRESSURE_LIMITS_HPA.1);
            let mut denser = current;
            denser.pressure_hpa += delta;

            let low = calculate(&CalculationRequest::new(current, EngineProfile::SeniorMaxEvo)).unwrap();
            let high = calculate(&CalculationRequest::new(denser, EngineProfile::SeniorMaxEvo)).unwrap();
            prop_assert!(high.calculations.density_ratio > low.calculations.density_ratio);
            prop_assert!(high.calculations.raw_main_jet > low.calculations.raw_main_jet);
            prop_assert!(high.recommendations.main_jet >= low.recommendations.main_jet);
        }

        /// Property: every recommendation is something that can be fitted.
        #[test]
        fn prop_settings_always_stocked(current in conditions(), (engine, jet) in engine_and_jet()) {
            let spec = engine.spec();
            let result = calculate(&CalculationRequest::new(current, engine).with_reference_jet(jet)).unwrap();
            let recs = &result.recommendations;

            prop_assert!(spec.jet_sizes.contains(recs.main_jet));
            prop_assert!((spec.min_needle_position..=spec.max_needle_position).contains(&recs.needle_position));
            prop_assert!(recs.needle_type == "K98" || recs.needle_type == "K27");
            if result.calculations.raw_main_jet >= spec.jet_sizes.smallest as f64
                && result.calculations.raw_main_jet <= spec.jet_sizes.largest as f64
            {
                prop_assert!(!result.has_warning(WarningCode::JetClamped));
            } else {
                prop_assert!(result.has_warning(WarningCode::JetClamped));
            }
        }
    }
}
