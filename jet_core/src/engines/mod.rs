//! # Engine Profiles
//!
//! Per-engine calibration data for the Rotax MAX family. Each
//! [`EngineProfile`] variant maps to one constant [`EngineSpec`] record that
//! holds everything profile-specific: the default calibration baseline, the
//! default reference jet, the stocked jet sizes and the band tables used to
//! pick needle clip, float level and needle type.
//!
//! Adding an engine means adding a variant and its record; the recommendation
//! code is table-driven and needs no changes.
//!
//! ## Example
//!
//! ```rust
//! use jet_core::engines::EngineProfile;
//!
//! let engine: EngineProfile = "Senior MAX EVO".parse().unwrap();
//! let spec = engine.spec();
//! assert_eq!(spec.default_reference_jet, 130);
//! assert!(spec.jet_sizes.contains(175));
//! ```

pub mod bands;
pub mod jet_sizes;

pub use bands::Band;
pub use jet_sizes::{ClampSide, JetSizeTable, SnappedJet};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::conditions::EnvironmentalConditions;
use crate::errors::JetError;
use bands::OPEN;

/// Supported engine profiles.
///
/// ## JSON Serialization
///
/// Serializes as the display name printed on the calculator form
/// (`"Senior MAX EVO"`); the variant name is accepted on input too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EngineProfile {
    /// Rotax Senior MAX EVO (125cc, full power)
    #[default]
    #[serde(rename = "Senior MAX EVO", alias = "SeniorMaxEvo")]
    SeniorMaxEvo,
    /// Rotax Junior MAX EVO (restricted exhaust)
    #[serde(rename = "Junior MAX EVO", alias = "JuniorMaxEvo")]
    JuniorMaxEvo,
    /// Rotax Mini MAX (restricted intake)
    #[serde(rename = "Mini MAX", alias = "MiniMax")]
    MiniMax,
}

/// Constant calibration record for one engine profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineSpec {
    /// Baseline under which `default_reference_jet` was established
    pub default_reference: EnvironmentalConditions,
    /// Known-good jet at the default baseline
    pub default_reference_jet: u32,
    /// Stocked main jet sizes
    pub jet_sizes: JetSizeTable,
    /// Inclusive range of jets the engine normally runs; leaving it is advisory only
    pub typical_jet_range: (u32, u32),
    /// Needle clip position used at the reference jet
    pub baseline_needle_position: u8,
    /// Lowest clip position (richest)
    pub min_needle_position: u8,
    /// Highest clip position (leanest)
    pub max_needle_position: u8,
    /// Clip offset from baseline, keyed by jet deviation in percent
    pub needle_position_bands: &'static [Band<i8>],
    /// Float level at the reference jet (mm)
    pub float_height_base_mm: f64,
    /// Float level offset in mm, keyed by jet deviation in percent
    pub float_height_bands: &'static [Band<f64>],
    /// Needle choice keyed by density deviation (ratio - 1)
    pub needle_type_bands: &'static [Band<&'static str>],
    /// Informational: volumetric efficiency from the tuning document
    pub volumetric_efficiency: f64,
}

/// Calibration baseline from the tuning document: warm, dry, 990 hPa.
pub const TUNING_BASELINE: EnvironmentalConditions = EnvironmentalConditions {
    temperature_c: 25.0,
    pressure_hpa: 990.0,
    humidity_pct: 0.0,
    altitude_m: 0.0,
};

/// Jets seen on the tuning sheets for every MAX engine.
const TYPICAL_JET_RANGE: (u32, u32) = (124, 136);

/// Richer jet (positive deviation) moves the clip down one notch.
const NEEDLE_POSITION_BANDS: &[Band<i8>] = &[
    Band::new(2.0, -1),
    Band::new(-2.0, 0),
    Band::new(OPEN, 1),
];

/// Leaner jet goes with a slightly higher fuel level.
const FLOAT_HEIGHT_BANDS: &[Band<f64>] = &[
    Band::new(3.0, -0.4),
    Band::new(1.0, -0.2),
    Band::new(-1.0, 0.0),
    Band::new(-3.0, 0.2),
    Band::new(OPEN, 0.4),
];

/// K27 is the richer taper, only for markedly dense air.
const NEEDLE_TYPE_BANDS: &[Band<&str>] = &[Band::new(0.06, "K27"), Band::new(OPEN, "K98")];

static SENIOR_MAX_EVO: EngineSpec = EngineSpec {
    default_reference: TUNING_BASELINE,
    default_reference_jet: 130,
    jet_sizes: JetSizeTable::new(110, 200, 1),
    typical_jet_range: TYPICAL_JET_RANGE,
    baseline_needle_position: 2,
    min_needle_position: 1,
    max_needle_position: 5,
    needle_position_bands: NEEDLE_POSITION_BANDS,
    float_height_base_mm: 15.0,
    float_height_bands: FLOAT_HEIGHT_BANDS,
    needle_type_bands: NEEDLE_TYPE_BANDS,
    volumetric_efficiency: 0.91,
};

static JUNIOR_MAX_EVO: EngineSpec = EngineSpec {
    default_reference: TUNING_BASELINE,
    default_reference_jet: 130,
    jet_sizes: JetSizeTable::new(110, 170, 2),
    typical_jet_range: TYPICAL_JET_RANGE,
    baseline_needle_position: 2,
    min_needle_position: 1,
    max_needle_position: 5,
    needle_position_bands: NEEDLE_POSITION_BANDS,
    float_height_base_mm: 15.0,
    float_height_bands: FLOAT_HEIGHT_BANDS,
    needle_type_bands: NEEDLE_TYPE_BANDS,
    volumetric_efficiency: 0.87,
};

static MINI_MAX: EngineSpec = EngineSpec {
    default_reference: TUNING_BASELINE,
    default_reference_jet: 130,
    jet_sizes: JetSizeTable::new(100, 160, 2),
    typical_jet_range: TYPICAL_JET_RANGE,
    baseline_needle_position: 2,
    min_needle_position: 1,
    max_needle_position: 5,
    needle_position_bands: NEEDLE_POSITION_BANDS,
    float_height_base_mm: 15.0,
    float_height_bands: FLOAT_HEIGHT_BANDS,
    needle_type_bands: NEEDLE_TYPE_BANDS,
    volumetric_efficiency: 0.58,
};

impl EngineProfile {
    /// All profiles, in display order
    pub const ALL: [EngineProfile; 3] = [
        EngineProfile::SeniorMaxEvo,
        EngineProfile::JuniorMaxEvo,
        EngineProfile::MiniMax,
    ];

    /// Constant calibration record for this profile
    pub fn spec(&self) -> &'static EngineSpec {
        match self {
            EngineProfile::SeniorMaxEvo => &SENIOR_MAX_EVO,
            EngineProfile::JuniorMaxEvo => &JUNIOR_MAX_EVO,
            EngineProfile::MiniMax => &MINI_MAX,
        }
    }

    /// Name as printed on the calculator form
    pub fn display_name(&self) -> &'static str {
        match self {
            EngineProfile::SeniorMaxEvo => "Senior MAX EVO",
            EngineProfile::JuniorMaxEvo => "Junior MAX EVO",
            EngineProfile::MiniMax => "Mini MAX",
        }
    }

    /// Kebab-case slug for command lines and config files
    pub fn slug(&self) -> &'static str {
        match self {
            EngineProfile::SeniorMaxEvo => "senior-max-evo",
            EngineProfile::JuniorMaxEvo => "junior-max-evo",
            EngineProfile::MiniMax => "mini-max",
        }
    }
}

impl fmt::Display for EngineProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for EngineProfile {
    type Err = JetError;

    /// Accepts the display name, variant name or slug, ignoring case,
    /// spaces, dashes and underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        EngineProfile::ALL
            .into_iter()
            .find(|engine| normalize(engine.display_name()) == wanted)
            .ok_or_else(|| JetError::unknown_engine(s.trim()))
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("Senior MAX EVO".parse::<EngineProfile>().unwrap(), EngineProfile::SeniorMaxEvo);
        assert_eq!("JuniorMaxEvo".parse::<EngineProfile>().unwrap(), EngineProfile::JuniorMaxEvo);
        assert_eq!("mini-max".parse::<EngineProfile>().unwrap(), EngineProfile::MiniMax);
        assert_eq!(" senior_max_evo ".parse::<EngineProfile>().unwrap(), EngineProfile::SeniorMaxEvo);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "Rok GP".parse::<EngineProfile>().unwrap_err();
        assert_eq!(err, JetError::unknown_engine("Rok GP"));
    }

    #[test]
    fn test_slug_roundtrip() {
        for engine in EngineProfile::ALL {
            assert_eq!(engine.slug().parse::<EngineProfile>().unwrap(), engine);
            assert_eq!(engine.to_string().parse::<EngineProfile>().unwrap(), engine);
        }
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&EngineProfile::JuniorMaxEvo).unwrap();
        assert_eq!(json, "\"Junior MAX EVO\"");

        let from_variant: EngineProfile = serde_json::from_str("\"MiniMax\"").unwrap();
        assert_eq!(from_variant, EngineProfile::MiniMax);
    }

    #[test]
    fn test_specs_are_consistent() {
        for engine in EngineProfile::ALL {
            let spec = engine.spec();
            assert!(
                spec.jet_sizes.contains(spec.default_reference_jet),
                "{engine}: default jet not stocked"
            );
            let (low, high) = spec.typical_jet_range;
            assert!(low <= spec.default_reference_jet && spec.default_reference_jet <= high);
            assert!(spec.jet_sizes.contains(low) && spec.jet_sizes.contains(high));
            assert!(spec.min_needle_position <= spec.baseline_needle_position);
            assert!(spec.baseline_needle_position <= spec.max_needle_position);
            assert!(bands::is_well_formed(spec.needle_position_bands));
            assert!(bands::is_well_formed(spec.float_height_bands));
            assert!(bands::is_well_formed(spec.needle_type_bands));
            assert_eq!(
                (spec.jet_sizes.largest - spec.jet_sizes.smallest) % spec.jet_sizes.increment,
                0,
                "{engine}: largest jet not reachable"
            );
        }
    }

    #[test]
    fn test_senior_table_holds_odd_sizes() {
        let table = EngineProfile::SeniorMaxEvo.spec().jet_sizes;
        assert!(table.contains(175));
        assert!(!EngineProfile::JuniorMaxEvo.spec().jet_sizes.contains(175));
    }
}
