//! # Moist Air Density
//!
//! Density of humid air from the ideal-gas law, with the water vapour
//! correction. Water vapour (M ≈ 18 g/mol) is lighter than dry air
//! (M ≈ 29 g/mol), so humid air at the same pressure and temperature is
//! less dense.
//!
//! ## Notation
//!
//! - `t` = Air temperature (°C)
//! - `T` = Absolute temperature (K)
//! - `P` = Absolute pressure (Pa)
//! - `RH` = Relative humidity (%)
//! - `es` = Saturation vapour pressure
//! - `Pw` = Partial pressure of water vapour (Pa)
//! - `Rd` = Specific gas constant of dry air, 287.05 J/(kg·K)
//! - `ρ` = Air density (kg/m³)
//!
//! ## References
//!
//! - Tetens, O. (1930), Über einige meteorologische Begriffe
//! - WMO Guide to Meteorological Instruments, Annex 4.B

use crate::conditions::EnvironmentalConditions;
use crate::errors::{JetError, JetResult};
use crate::units::{Celsius, Hectopascals, Kelvin, KgPerM3, Pascals, Percent};

/// Specific gas constant for dry air, J/(kg·K)
pub const GAS_CONSTANT_DRY_AIR: f64 = 287.05;

/// 1 - Mw/Md: molar mass ratio correction for water vapour
pub const VAPOR_CORRECTION: f64 = 0.378;

/// Tetens coefficient: saturation pressure at 0 °C (hPa)
pub const TETENS_E0_HPA: f64 = 6.1078;

/// Tetens coefficient a (base-10 form)
pub const TETENS_A: f64 = 7.5;

/// Tetens coefficient b (°C)
pub const TETENS_B: f64 = 237.3;

/// Saturation vapour pressure over water (Tetens)
///
/// # Formula
/// - es = 6.1078 × 10^(7.5·t / (237.3 + t))   [hPa]
#[inline]
pub fn saturation_vapor_pressure(t: Celsius) -> Hectopascals {
    Hectopascals(TETENS_E0_HPA * 10f64.powf(TETENS_A * t.0 / (TETENS_B + t.0)))
}

/// Partial pressure of water vapour
///
/// # Formula
/// - Pw = (RH / 100) × es
#[inline]
pub fn vapor_partial_pressure(t: Celsius, rh: Percent) -> Pascals {
    let es: Pascals = saturation_vapor_pressure(t).into();
    es * rh.fraction()
}

/// Density of moist air
///
/// # Formula
/// - ρ = (P / (Rd × T)) × (1 − 0.378 × Pw / P)
///
/// No range checks; see [`air_density`] for the checked version.
#[inline]
pub fn moist_air_density(t: Celsius, p: Hectopascals, rh: Percent) -> KgPerM3 {
    let temp: Kelvin = t.into();
    let pressure: Pascals = p.into();
    let pw = vapor_partial_pressure(t, rh);

    let dry = pressure.0 / (GAS_CONSTANT_DRY_AIR * temp.0);
    KgPerM3(dry * (1.0 - VAPOR_CORRECTION * (pw.0 / pressure.0)))
}

/// Air density for one set of conditions.
///
/// Altitude is ignored: the measured pressure already reflects it.
///
/// # Errors
///
/// `JetError::Computation` if the density is not finite and positive. This
/// cannot happen for conditions that passed validation.
///
/// # Example
///
/// ```rust
/// use jet_core::conditions::EnvironmentalConditions;
/// use jet_core::equations::air_density;
///
/// let rho = air_density(&EnvironmentalConditions::new(25.0, 990.0, 0.0)).unwrap();
/// assert!((rho.0 - 1.1568).abs() < 1e-3);
/// ```
pub fn air_density(conditions: &EnvironmentalConditions) -> JetResult<KgPerM3> {
    let rho = moist_air_density(
        conditions.temperature(),
        conditions.pressure(),
        conditions.humidity(),
    );

    if !rho.0.is_finite() || rho.0 <= 0.0 {
        return Err(JetError::computation(
            "air density",
            format!(
                "density {} kg/m³ is not positive for t={} °C, p={} hPa, rh={} %",
                rho.0, conditions.temperature_c, conditions.pressure_hpa, conditions.humidity_pct
            ),
        ));
    }

    Ok(rho)
}

/// Dew point by inverting the Tetens formula
///
/// # Formula
/// - g = log10(Pw / 6.1078)
/// - td = 237.3 × g / (7.5 − g)
///
/// Returns `None` for bone-dry air (RH = 0), which has no dew point.
pub fn dew_point(t: Celsius, rh: Percent) -> Option<Celsius> {
    if rh.0 <= 0.0 {
        return None;
    }
    let pw: Hectopascals = vapor_partial_pressure(t, rh).into();
    let g = (pw.0 / TETENS_E0_HPA).log10();
    let td = TETENS_B * g / (TETENS_A - g);
    td.is_finite().then_some(Celsius(td))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturation_vapor_pressure() {
        // 0 °C -> e0 exactly
        assert!((saturation_vapor_pressure(Celsius(0.0)).0 - 6.1078).abs() < 1e-12);
        // 20 °C ≈ 23.4 hPa, 35 °C ≈ 56.2 hPa
        assert!((saturation_vapor_pressure(Celsius(20.0)).0 - 23.38).abs() < 0.05);
        assert!((saturation_vapor_pressure(Celsius(35.0)).0 - 56.22).abs() < 0.05);
    }

    #[test]
    fn test_dry_air_density_tuning_baseline() {
        // 990 hPa, 25 °C, dry: ρ = 99000 / (287.05 × 298.15) = 1.15676
        let rho = moist_air_density(Celsius(25.0), Hectopascals(990.0), Percent(0.0));
        assert!((rho.0 - 1.15676).abs() < 1e-4);
    }

    #[test]
    fn test_standard_atmosphere_half_humidity() {
        let rho = moist_air_density(Celsius(20.0), Hectopascals(1013.25), Percent(50.0));
        assert!((rho.0 - 1.19887).abs() < 1e-4);
    }

    #[test]
    fn test_humidity_lowers_density() {
        let dry = moist_air_density(Celsius(30.0), Hectopascals(1000.0), Percent(0.0));
        let wet = moist_air_density(Celsius(30.0), Hectopascals(1000.0), Percent(100.0));
        assert!(wet < dry);
    }

    #[test]
    fn test_altitude_is_ignored() {
        let low = EnvironmentalConditions::new(15.0, 950.0, 60.0);
        let high = low.with_altitude(2500.0);
        assert_eq!(air_density(&low).unwrap(), air_density(&high).unwrap());
    }

    #[test]
    fn test_non_physical_density_is_computation_error() {
        // Near-vacuum with saturated hot air: vapour correction exceeds 1
        let conditions = EnvironmentalConditions::new(90.0, 1.0, 100.0);
        let err = air_density(&conditions).unwrap_err();
        assert!(err.is_computation());
    }

    #[test]
    fn test_dew_point() {
        let td = dew_point(Celsius(20.0), Percent(50.0)).unwrap();
        assert!((td.0 - 9.27).abs() < 0.05);

        // Saturated air: dew point equals air temperature
        let td = dew_point(Celsius(12.0), Percent(100.0)).unwrap();
        assert!((td.0 - 12.0).abs() < 1e-9);

        assert!(dew_point(Celsius(20.0), Percent(0.0)).is_none());
    }
}
