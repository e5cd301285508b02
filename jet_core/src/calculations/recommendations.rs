//! # Recommendation Assembler
//!
//! Turns the continuous model output into hardware settings a mechanic can
//! actually fit: a stocked main jet, a needle clip notch, a float level and a
//! needle. All mapping is table-driven from the engine's [`EngineSpec`].
//!
//! ## Deviation Keys
//!
//! - Jet deviation (percent): `(main_jet / reference_jet − 1) × 100`, keys the
//!   needle clip and float level bands.
//! - Density deviation: `density_ratio − 1`, keys the needle type bands.

use serde::{Deserialize, Serialize};

use super::warnings::{clamp_warning, envelope_warning, typical_range_warning, Warning};
use crate::engines::bands::lookup;
use crate::engines::EngineSpec;

/// Discrete settings recommended for the current conditions.
///
/// ## JSON Example
///
/// ```json
/// {
///   "main_jet": 172,
///   "needle_position": 2,
///   "float_height_mm": 15.2,
///   "needle_type": "K98"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    /// Main jet size, always a stocked size
    pub main_jet: u32,
    /// Needle clip position (1 = richest)
    pub needle_position: u8,
    /// Float level in mm
    pub float_height_mm: f64,
    /// Needle designation (e.g. "K98")
    pub needle_type: String,
}

/// Jet deviation in percent of the reference jet
pub fn jet_deviation_pct(main_jet: u32, reference_jet: u32) -> f64 {
    (main_jet as f64 / reference_jet as f64 - 1.0) * 100.0
}

/// Needle clip notch for a jet deviation, kept inside the engine's clip range
pub fn needle_position(spec: &EngineSpec, jet_deviation_pct: f64) -> u8 {
    let offset = lookup(spec.needle_position_bands, jet_deviation_pct).copied().unwrap_or(0);
    let position = i16::from(spec.baseline_needle_position) + i16::from(offset);
    position.clamp(
        i16::from(spec.min_needle_position),
        i16::from(spec.max_needle_position),
    ) as u8
}

/// Float level for a jet deviation, to the nearest 0.1 mm
pub fn float_height_mm(spec: &EngineSpec, jet_deviation_pct: f64) -> f64 {
    let offset = lookup(spec.float_height_bands, jet_deviation_pct).copied().unwrap_or(0.0);
    ((spec.float_height_base_mm + offset) * 10.0).round() / 10.0
}

/// Needle designation for a density ratio
pub fn needle_type(spec: &EngineSpec, density_ratio: f64) -> &'static str {
    lookup(spec.needle_type_bands, density_ratio - 1.0)
        .copied()
        .unwrap_or_default()
}

/// Snap the raw jet and derive the remaining settings.
///
/// Returns the settings plus the model warnings (envelope, typical range,
/// then clamp).
/// `raw_jet` and `density_ratio` must be finite; `calculate` checks both.
pub fn assemble(
    spec: &EngineSpec,
    reference_jet: u32,
    raw_jet: f64,
    density_ratio: f64,
) -> (Recommendations, Vec<Warning>) {
    let mut warnings = Vec::new();

    if let Some(warning) = envelope_warning(density_ratio) {
        warnings.push(warning);
    }

    let snapped = spec.jet_sizes.snap(raw_jet);
    if let Some(warning) = typical_range_warning(snapped.size, reference_jet, spec.typical_jet_range) {
        warnings.push(warning);
    }
    if let Some(side) = snapped.clamped {
        warnings.push(clamp_warning(raw_jet, side, &spec.jet_sizes));
    }

    let deviation = jet_deviation_pct(snapped.size, reference_jet);

    let recommendations = Recommendations {
        main_jet: snapped.size,
        needle_position: needle_position(spec, deviation),
        float_height_mm: float_height_mm(spec, deviation),
        needle_type: needle_type(spec, density_ratio).to_string(),
    };

    (recommendations, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::warnings::WarningCode;
    use crate::engines::EngineProfile;

    fn senior() -> &'static EngineSpec {
        EngineProfile::SeniorMaxEvo.spec()
    }

    #[test]
    fn test_jet_deviation() {
        assert_eq!(jet_deviation_pct(130, 130), 0.0);
        assert!((jet_deviation_pct(172, 175) + 1.714).abs() < 0.001);
        assert!((jet_deviation_pct(136, 130) - 4.615).abs() < 0.001);
    }

    #[test]
    fn test_needle_position_bands() {
        let spec = senior();
        assert_eq!(needle_position(spec, 0.0), 2);
        assert_eq!(needle_position(spec, 1.9), 2);
        assert_eq!(needle_position(spec, 2.0), 1);
        assert_eq!(needle_position(spec, -2.0), 2);
        assert_eq!(needle_position(spec, -2.5), 3);
    }

    #[test]
    fn test_float_height_bands() {
        let spec = senior();
        assert_eq!(float_height_mm(spec, 0.0), 15.0);
        assert_eq!(float_height_mm(spec, 1.5), 14.8);
        assert_eq!(float_height_mm(spec, 4.6), 14.6);
        assert_eq!(float_height_mm(spec, -1.7), 15.2);
        assert_eq!(float_height_mm(spec, -4.0), 15.4);
    }

    #[test]
    fn test_needle_type_bands() {
        let spec = senior();
        assert_eq!(needle_type(spec, 1.0), "K98");
        assert_eq!(needle_type(spec, 0.8), "K98");
        assert_eq!(needle_type(spec, 1.06), "K27");
        assert_eq!(needle_type(spec, 1.19), "K27");
    }

    #[test]
    fn test_assemble_identity() {
        let (recs, warnings) = assemble(senior(), 175, 175.0, 1.0);
        assert_eq!(
            recs,
            Recommendations {
                main_jet: 175,
                needle_position: 2,
                float_height_mm: 15.0,
                needle_type: "K98".to_string(),
            }
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_assemble_thin_air() {
        let (recs, warnings) = assemble(senior(), 175, 171.713, 0.92696);
        assert_eq!(recs.main_jet, 172);
        assert_eq!(recs.needle_position, 2);
        assert_eq!(recs.float_height_mm, 15.2);
        assert_eq!(recs.needle_type, "K98");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, WarningCode::OutsideCalibrationEnvelope);
    }

    #[test]
    fn test_assemble_clamps_and_warns_after_envelope() {
        let spec = EngineProfile::JuniorMaxEvo.spec();
        let (recs, warnings) = assemble(spec, 110, 104.601, 0.81766);
        assert_eq!(recs.main_jet, 110);
        assert!(spec.jet_sizes.contains(recs.main_jet));
        let codes: Vec<_> = warnings.iter().map(|w| w.code).collect();
        assert_eq!(
            codes,
            vec![WarningCode::OutsideCalibrationEnvelope, WarningCode::JetClamped]
        );
    }

    #[test]
    fn test_assemble_leaves_typical_range() {
        // Default 130 on a very dense day: raw ≈ 137.4
        let (recs, warnings) = assemble(senior(), 130, 137.435, 1.2491);
        assert_eq!(recs.main_jet, 137);
        let codes: Vec<_> = warnings.iter().map(|w| w.code).collect();
        assert_eq!(
            codes,
            vec![WarningCode::OutsideCalibrationEnvelope, WarningCode::JetOutsideTypicalRange]
        );
    }

    #[test]
    fn test_assemble_typical_before_clamp() {
        let spec = EngineProfile::JuniorMaxEvo.spec();
        let (recs, warnings) = assemble(spec, 130, 104.0, 0.64);
        assert_eq!(recs.main_jet, 110);
        let codes: Vec<_> = warnings.iter().map(|w| w.code).collect();
        assert_eq!(
            codes,
            vec![
                WarningCode::OutsideCalibrationEnvelope,
                WarningCode::JetOutsideTypicalRange,
                WarningCode::JetClamped,
            ]
        );
    }

    #[test]
    fn test_needle_position_stays_in_clip_range() {
        let spec = senior();
        for deviation in [-50.0, -10.0, 0.0, 10.0, 50.0] {
            let position = needle_position(spec, deviation);
            assert!((spec.min_needle_position..=spec.max_needle_position).contains(&position));
        }
    }
}
