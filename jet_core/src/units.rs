//! # Unit Types
//!
//! Type-safe wrappers for the atmospheric units used by the jetting model.
//! They are plain f64 newtypes so JSON stays clean (just numbers) and the
//! physics code cannot mix up hectopascals and pascals or °C and K.
//!
//! ## Units
//!
//! - Temperature: degrees Celsius (input), kelvin (gas law)
//! - Pressure: hectopascals (input, weather reports), pascals (gas law)
//! - Relative humidity: percent
//! - Altitude: metres above sea level
//! - Density: kilograms per cubic metre
//!
//! ## Example
//!
//! ```rust
//! use jet_core::units::{Celsius, Hectopascals, Kelvin, Pascals};
//!
//! let t: Kelvin = Celsius(20.0).into();
//! assert!((t.0 - 293.15).abs() < 1e-9);
//!
//! let p: Pascals = Hectopascals(1013.25).into();
//! assert_eq!(p.0, 101_325.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// Offset between the Celsius and Kelvin scales
pub const CELSIUS_TO_KELVIN: f64 = 273.15;

/// Pascals per hectopascal
pub const PA_PER_HPA: f64 = 100.0;

// ============================================================================
// Temperature Units
// ============================================================================

/// Temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Celsius(pub f64);

/// Absolute temperature in kelvin
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kelvin(pub f64);

impl From<Celsius> for Kelvin {
    fn from(c: Celsius) -> Self {
        Kelvin(c.0 + CELSIUS_TO_KELVIN)
    }
}

impl From<Kelvin> for Celsius {
    fn from(k: Kelvin) -> Self {
        Celsius(k.0 - CELSIUS_TO_KELVIN)
    }
}

// ============================================================================
// Pressure Units
// ============================================================================

/// Pressure in hectopascals (millibar)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hectopascals(pub f64);

/// Pressure in pascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pascals(pub f64);

impl From<Hectopascals> for Pascals {
    fn from(hpa: Hectopascals) -> Self {
        Pascals(hpa.0 * PA_PER_HPA)
    }
}

impl From<Pascals> for Hectopascals {
    fn from(pa: Pascals) -> Self {
        Hectopascals(pa.0 / PA_PER_HPA)
    }
}

// ============================================================================
// Humidity, Altitude, Density
// ============================================================================

/// Relative humidity in percent (0-100)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(pub f64);

impl Percent {
    /// Convert to a 0-1 fraction
    pub fn fraction(self) -> f64 {
        self.0 / 100.0
    }
}

/// Altitude in metres above sea level
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Mass density in kg/m³
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KgPerM3(pub f64);

/// Scale a pressure, e.g. saturation pressure by relative humidity
impl Mul<f64> for Pascals {
    type Output = Pascals;
    fn mul(self, rhs: f64) -> Pascals {
        Pascals(self.0 * rhs)
    }
}
