//! Advisory warnings attached to a successful calculation.
//!
//! Warnings never block a result. Their order is fixed: input edge
//! conditions first, then model envelope, then typical jet range, then jet
//! clamping.

use serde::{Deserialize, Serialize};

use crate::conditions::EnvironmentalConditions;
use crate::engines::{ClampSide, JetSizeTable};
use crate::equations::dew_point;
use crate::validation::{
    in_range, ALTITUDE_PLAUSIBLE_M, HUMIDITY_PLAUSIBLE_PCT, PRESSURE_PLAUSIBLE_HPA,
    TEMPERATURE_PLAUSIBLE_C,
};

/// Largest |density ratio − 1| the fourth-root law is calibrated for
pub const ENVELOPE_THRESHOLD: f64 = 0.05;

/// Humidity above which cold air risks condensation in the fuel system, %
pub const CONDENSATION_HUMIDITY_PCT: f64 = 90.0;

/// Temperature below which humid air risks condensation, °C
pub const CONDENSATION_TEMPERATURE_C: f64 = 10.0;

/// Stable machine-readable warning codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCode {
    TemperatureExtreme,
    HumidityExtreme,
    PressureExtreme,
    AltitudeExtreme,
    CondensationRisk,
    OutsideCalibrationEnvelope,
    JetOutsideTypicalRange,
    JetClamped,
}

impl WarningCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningCode::TemperatureExtreme => "temperature_extreme",
            WarningCode::HumidityExtreme => "humidity_extreme",
            WarningCode::PressureExtreme => "pressure_extreme",
            WarningCode::AltitudeExtreme => "altitude_extreme",
            WarningCode::CondensationRisk => "condensation_risk",
            WarningCode::OutsideCalibrationEnvelope => "outside_calibration_envelope",
            WarningCode::JetOutsideTypicalRange => "jet_outside_typical_range",
            WarningCode::JetClamped => "jet_clamped",
        }
    }
}

/// One advisory message.
///
/// ## JSON Example
///
/// ```json
/// { "code": "jet_clamped", "message": "Computed jet 104.6 is below the smallest stocked jet; using 110" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    pub code: WarningCode,
    pub message: String,
}

impl Warning {
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Warning {
            code,
            message: message.into(),
        }
    }
}

/// Warnings about the current conditions sitting at the edge of the
/// plausible range.
pub fn condition_warnings(current: &EnvironmentalConditions) -> Vec<Warning> {
    let mut warnings = Vec::new();

    if !in_range(current.temperature_c, TEMPERATURE_PLAUSIBLE_C) {
        warnings.push(Warning::new(
            WarningCode::TemperatureExtreme,
            format!(
                "Temperature {:.1} °C is outside the usual {} to {} °C range; check the sensor reading",
                current.temperature_c, TEMPERATURE_PLAUSIBLE_C.0, TEMPERATURE_PLAUSIBLE_C.1
            ),
        ));
    }

    if !in_range(current.humidity_pct, HUMIDITY_PLAUSIBLE_PCT) {
        warnings.push(Warning::new(
            WarningCode::HumidityExtreme,
            format!(
                "Humidity {:.0} % is at the edge of the measurable range; hygrometers are least accurate here",
                current.humidity_pct
            ),
        ));
    }

    if !in_range(current.pressure_hpa, PRESSURE_PLAUSIBLE_HPA) {
        warnings.push(Warning::new(
            WarningCode::PressureExtreme,
            format!(
                "Pressure {:.1} hPa is outside the usual {} to {} hPa range; make sure it is station pressure, not sea-level pressure",
                current.pressure_hpa, PRESSURE_PLAUSIBLE_HPA.0, PRESSURE_PLAUSIBLE_HPA.1
            ),
        ));
    }

    if !in_range(current.altitude_m, ALTITUDE_PLAUSIBLE_M) {
        warnings.push(Warning::new(
            WarningCode::AltitudeExtreme,
            format!(
                "Altitude {:.0} m is outside the usual {} to {} m range",
                current.altitude_m, ALTITUDE_PLAUSIBLE_M.0, ALTITUDE_PLAUSIBLE_M.1
            ),
        ));
    }

    if current.humidity_pct > CONDENSATION_HUMIDITY_PCT && current.temperature_c < CONDENSATION_TEMPERATURE_C {
        let dew = dew_point(current.temperature(), current.humidity())
            .map(|td| format!(" (dew point {:.1} °C)", td.0))
            .unwrap_or_default();
        warnings.push(Warning::new(
            WarningCode::CondensationRisk,
            format!("Temperature is close to the dew point{dew}. Risk of water condensation in the fuel system"),
        ));
    }

    warnings
}

/// Warning when the density ratio leaves the calibrated envelope.
pub fn envelope_warning(density_ratio: f64) -> Option<Warning> {
    let deviation = density_ratio - 1.0;
    (deviation.abs() > ENVELOPE_THRESHOLD).then(|| {
        Warning::new(
            WarningCode::OutsideCalibrationEnvelope,
            format!(
                "Air is {:.1} % {} than the reference; beyond ±{:.0} % the recommendation is approximate, verify with a plug chop",
                deviation.abs() * 100.0,
                if deviation > 0.0 { "denser" } else { "thinner" },
                ENVELOPE_THRESHOLD * 100.0
            ),
        )
    })
}

/// Warning when the recommendation leaves the engine's typical jet range.
///
/// Only raised when the reference jet sits inside that range: a baseline
/// that is already unusual is the caller's own calibration, not news.
pub fn typical_range_warning(main_jet: u32, reference_jet: u32, (low, high): (u32, u32)) -> Option<Warning> {
    let typical = |jet: u32| (low..=high).contains(&jet);
    (typical(reference_jet) && !typical(main_jet)).then(|| {
        Warning::new(
            WarningCode::JetOutsideTypicalRange,
            format!("Recommended jet {main_jet} is outside the typical {low} to {high} range for this engine"),
        )
    })
}

/// Warning when the raw jet was clamped onto the table boundary.
pub fn clamp_warning(raw_jet: f64, side: ClampSide, table: &JetSizeTable) -> Warning {
    let message = match side {
        ClampSide::Below => format!(
            "Computed jet {raw_jet:.1} is below the smallest stocked jet; using {}",
            table.smallest
        ),
        ClampSide::Above => format!(
            "Computed jet {raw_jet:.1} is above the largest stocked jet; using {}",
            table.largest
        ),
    };
    Warning::new(WarningCode::JetClamped, message)
}
