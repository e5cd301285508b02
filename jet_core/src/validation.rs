//! # Input Validation
//!
//! Two layers stand between raw input and the physical model:
//!
//! 1. [`request_from_json`] turns an untyped JSON body (the shape posted by
//!    the calculator form) into a typed [`CalculationRequest`], rejecting
//!    missing and non-numeric fields.
//! 2. [`validate_request`] rejects physically impossible values before any
//!    computation runs.
//!
//! Hard rejection is reserved for values the model cannot handle. Values that
//! are merely unusual (a 55 °C heat wave, 800 hPa up a mountain) still compute
//! and get advisory warnings from the recommendation stage instead.
//!
//! ## Limits
//!
//! | field | rejected outside | warned outside |
//! |---|---|---|
//! | temperature | [-100, 60] °C | [-20, 50] °C |
//! | pressure | [300, 1200] hPa | [850, 1100] hPa |
//! | humidity | [0, 100] % | [5, 95] % |
//! | altitude | non-finite | [0, 5000] m |

use serde_json::{Map, Value};

use crate::calculations::CalculationRequest;
use crate::conditions::EnvironmentalConditions;
use crate::engines::EngineProfile;
use crate::errors::{JetError, JetResult};

/// Inclusive `(min, max)` range
pub type Range = (f64, f64);

/// Domain of the Tetens approximation, °C
pub const TEMPERATURE_LIMITS_C: Range = (-100.0, 60.0);
/// Surface pressures the model accepts, hPa
pub const PRESSURE_LIMITS_HPA: Range = (300.0, 1200.0);
/// Relative humidity, %
pub const HUMIDITY_LIMITS_PCT: Range = (0.0, 100.0);

/// Typical racing temperatures, °C
pub const TEMPERATURE_PLAUSIBLE_C: Range = (-20.0, 50.0);
/// Typical station pressures, hPa
pub const PRESSURE_PLAUSIBLE_HPA: Range = (850.0, 1100.0);
/// Humidity away from the sensor extremes, %
pub const HUMIDITY_PLAUSIBLE_PCT: Range = (5.0, 95.0);
/// Track altitudes, m
pub const ALTITUDE_PLAUSIBLE_M: Range = (0.0, 5000.0);

/// True when `value` lies within the inclusive range
pub fn in_range(value: f64, (min, max): Range) -> bool {
    value >= min && value <= max
}

/// Validate one set of conditions.
///
/// `prefix` qualifies field names in errors (`current`, `reference`).
pub fn validate_conditions(conditions: &EnvironmentalConditions, prefix: &str) -> JetResult<()> {
    check_range(
        &format!("{prefix}.temperature_c"),
        conditions.temperature_c,
        TEMPERATURE_LIMITS_C,
        "°C",
    )?;
    check_range(
        &format!("{prefix}.pressure_hpa"),
        conditions.pressure_hpa,
        PRESSURE_LIMITS_HPA,
        "hPa",
    )?;
    check_range(
        &format!("{prefix}.humidity_pct"),
        conditions.humidity_pct,
        HUMIDITY_LIMITS_PCT,
        "%",
    )?;
    if !conditions.altitude_m.is_finite() {
        return Err(JetError::invalid_input(
            format!("{prefix}.altitude_m"),
            conditions.altitude_m.to_string(),
            "Must be a finite number",
        ));
    }
    Ok(())
}

/// Validate a full request: current and reference conditions, reference jet.
///
/// The reference jet must be one the engine's table stocks, otherwise the
/// identity case (same air, same jet) could not hold.
pub fn validate_request(request: &CalculationRequest) -> JetResult<()> {
    validate_conditions(&request.current, "current")?;
    if let Some(reference) = &request.reference {
        validate_conditions(reference, "reference")?;
    }
    if let Some(jet) = request.reference_jet {
        let table = &request.engine.spec().jet_sizes;
        if !table.contains(jet) {
            return Err(JetError::invalid_input(
                "reference_jet",
                jet.to_string(),
                format!(
                    "Not a stocked {} jet (sizes {}..={} in steps of {})",
                    request.engine, table.smallest, table.largest, table.increment
                ),
            ));
        }
    }
    Ok(())
}

fn check_range(field: &str, value: f64, limits: Range, unit: &str) -> JetResult<()> {
    if !value.is_finite() {
        return Err(JetError::invalid_input(field, value.to_string(), "Must be a finite number"));
    }
    if !in_range(value, limits) {
        return Err(JetError::invalid_input(
            field,
            value.to_string(),
            format!("Must be between {} and {} {unit}", limits.0, limits.1),
        ));
    }
    Ok(())
}

// ============================================================================
// JSON Request Adapter
// ============================================================================

/// Build a [`CalculationRequest`] from an untyped JSON body.
///
/// Accepts the calculator form's keys (`temperature`, `pressure`,
/// `humidity`, `altitude`, `engine_type`, `reference_jet`,
/// `reference_conditions`) and their unit-suffixed spellings. Only the
/// shape is checked here; physical ranges are checked by `calculate`.
///
/// # Errors
///
/// - `MissingField` for an absent required key
/// - `InvalidInput` for a non-numeric value or an invalid reference jet
/// - `UnknownEngine` for an unrecognised engine name
///
/// # Example
///
/// ```rust
/// use jet_core::validation::request_from_json;
///
/// let body = serde_json::json!({
///     "temperature": 25,
///     "pressure": 1013,
///     "humidity": 50,
///     "altitude": 100,
///     "engine_type": "Senior MAX EVO"
/// });
/// let request = request_from_json(&body).unwrap();
/// assert_eq!(request.current.altitude_m, 100.0);
/// assert!(request.reference.is_none());
/// ```
pub fn request_from_json(body: &Value) -> JetResult<CalculationRequest> {
    let obj = body.as_object().ok_or_else(|| {
        JetError::invalid_input("request", json_kind(body), "Request body must be a JSON object")
    })?;

    let current = conditions_from_json(obj, "")?;

    let engine = match lookup(obj, &["engine_type", "engine"]) {
        None | Some((_, Value::Null)) => return Err(JetError::missing_field("engine_type")),
        Some((_, Value::String(name))) => name.parse::<EngineProfile>()?,
        Some((key, other)) => {
            return Err(JetError::invalid_input(key, json_kind(other), "Must be an engine name"))
        }
    };

    let reference_jet = match lookup(obj, &["reference_jet"]) {
        None | Some((_, Value::Null)) => None,
        Some((key, value)) => Some(jet_from_json(key, value)?),
    };

    let reference = match lookup(obj, &["reference_conditions", "reference"]) {
        None | Some((_, Value::Null)) => None,
        Some((_, Value::Object(inner))) => Some(conditions_from_json(inner, "reference_conditions.")?),
        Some((key, other)) => {
            return Err(JetError::invalid_input(key, json_kind(other), "Must be an object"))
        }
    };

    Ok(CalculationRequest {
        current,
        reference,
        engine,
        reference_jet,
    })
}

fn conditions_from_json(obj: &Map<String, Value>, prefix: &str) -> JetResult<EnvironmentalConditions> {
    let temperature_c = required_number(obj, prefix, &["temperature", "temperature_c"])?;
    let pressure_hpa = required_number(obj, prefix, &["pressure", "pressure_hpa"])?;
    let humidity_pct = required_number(obj, prefix, &["humidity", "humidity_pct"])?;
    let altitude_m = optional_number(obj, prefix, &["altitude", "altitude_m"])?.unwrap_or(0.0);

    Ok(EnvironmentalConditions {
        temperature_c,
        pressure_hpa,
        humidity_pct,
        altitude_m,
    })
}

fn required_number(obj: &Map<String, Value>, prefix: &str, keys: &[&str]) -> JetResult<f64> {
    optional_number(obj, prefix, keys)?
        .ok_or_else(|| JetError::missing_field(format!("{prefix}{}", keys[0])))
}

fn optional_number(obj: &Map<String, Value>, prefix: &str, keys: &[&str]) -> JetResult<Option<f64>> {
    match lookup(obj, keys) {
        None | Some((_, Value::Null)) => Ok(None),
        Some((key, Value::Number(n))) => n.as_f64().map(Some).ok_or_else(|| {
            JetError::invalid_input(format!("{prefix}{key}"), n.to_string(), "Must be a number")
        }),
        Some((key, other)) => Err(JetError::invalid_input(
            format!("{prefix}{key}"),
            json_kind(other),
            "Must be a number",
        )),
    }
}

fn jet_from_json(key: &str, value: &Value) -> JetResult<u32> {
    let Value::Number(n) = value else {
        return Err(JetError::invalid_input(key, json_kind(value), "Must be a number"));
    };
    n.as_u64()
        .filter(|&jet| jet > 0)
        .and_then(|jet| u32::try_from(jet).ok())
        .ok_or_else(|| {
            JetError::invalid_input(key, n.to_string(), "Reference jet must be a positive whole size")
        })
}

/// First key present in `obj`, with its value
fn lookup<'a>(obj: &'a Map<String, Value>, keys: &[&'a str]) -> Option<(&'a str, &'a Value)> {
    keys.iter()
        .find_map(|key| obj.get(*key).map(|value| (*key, value)))
}

/// Short description of a JSON value for error messages
fn json_kind(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{s}\""),
        Value::Bool(b) => b.to_string(),
        Value::Array(_) => "array".to_string(),
        Value::Object(_) => "object".to_string(),
        Value::Null => "null".to_string(),
        Value::Number(n) => n.to_string(),
    }
}
