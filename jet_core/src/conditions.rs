//! # Environmental Conditions
//!
//! The atmospheric state a calculation runs against: either the current
//! trackside conditions or the reference (calibration) baseline under which a
//! known-good jet was established.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "temperature_c": 20.0,
//!   "pressure_hpa": 1013.25,
//!   "humidity_pct": 50.0,
//!   "altitude_m": 150.0
//! }
//! ```
//!
//! The unsuffixed keys `temperature`, `pressure`, `humidity` and `altitude`
//! are accepted on input as well.

use serde::{Deserialize, Serialize};

use crate::units::{Celsius, Hectopascals, Meters, Percent};

/// Temperature, pressure, humidity and altitude at one point in time.
///
/// Pressure is the measured station (absolute) pressure, not the
/// sea-level-corrected value most weather apps display. Altitude is carried
/// for display only; pressure already reflects it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalConditions {
    /// Air temperature in °C
    #[serde(alias = "temperature")]
    pub temperature_c: f64,

    /// Absolute air pressure in hPa
    #[serde(alias = "pressure")]
    pub pressure_hpa: f64,

    /// Relative humidity in percent (0-100)
    #[serde(alias = "humidity")]
    pub humidity_pct: f64,

    /// Altitude in metres above sea level (informational)
    #[serde(alias = "altitude", default)]
    pub altitude_m: f64,
}

impl EnvironmentalConditions {
    /// Create conditions at sea level (altitude 0 m).
    ///
    /// # Example
    ///
    /// ```rust
    /// use jet_core::conditions::EnvironmentalConditions;
    ///
    /// let c = EnvironmentalConditions::new(20.0, 1013.25, 50.0);
    /// assert_eq!(c.altitude_m, 0.0);
    /// ```
    pub fn new(temperature_c: f64, pressure_hpa: f64, humidity_pct: f64) -> Self {
        EnvironmentalConditions {
            temperature_c,
            pressure_hpa,
            humidity_pct,
            altitude_m: 0.0,
        }
    }

    /// Set the (informational) altitude.
    pub fn with_altitude(mut self, altitude_m: f64) -> Self {
        self.altitude_m = altitude_m;
        self
    }

    pub fn temperature(&self) -> Celsius {
        Celsius(self.temperature_c)
    }

    pub fn pressure(&self) -> Hectopascals {
        Hectopascals(self.pressure_hpa)
    }

    pub fn humidity(&self) -> Percent {
        Percent(self.humidity_pct)
    }

    pub fn altitude(&self) -> Meters {
        Meters(self.altitude_m)
    }
}
