use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use jet_core::{
    calculate, request_from_json, update_logbook, CalculationRequest, EngineProfile,
    EnvironmentalConditions, JetError, SavedSetting,
};
use serde_json::Value;
use tracing::info;

use super::print_json;
use crate::config::CliConfig;
use crate::report::render_result;

#[derive(Args, Debug, Default)]
pub struct CalculateArgs {
    /// Current air temperature (°C)
    #[arg(long, allow_negative_numbers = true)]
    pub temperature: Option<f64>,
    /// Current station pressure (hPa)
    #[arg(long)]
    pub pressure: Option<f64>,
    /// Current relative humidity (%)
    #[arg(long)]
    pub humidity: Option<f64>,
    /// Track altitude (m), shown in the report only
    #[arg(long, allow_negative_numbers = true)]
    pub altitude: Option<f64>,

    /// Engine profile (e.g. "Senior MAX EVO" or senior-max-evo)
    #[arg(short, long)]
    pub engine: Option<EngineProfile>,
    /// Known-good jet at the reference conditions
    #[arg(long)]
    pub reference_jet: Option<u32>,

    /// Reference temperature (°C)
    #[arg(long, allow_negative_numbers = true)]
    pub ref_temperature: Option<f64>,
    /// Reference pressure (hPa)
    #[arg(long)]
    pub ref_pressure: Option<f64>,
    /// Reference relative humidity (%)
    #[arg(long)]
    pub ref_humidity: Option<f64>,
    /// Reference altitude (m)
    #[arg(long, allow_negative_numbers = true)]
    pub ref_altitude: Option<f64>,

    /// Read a JSON request body from FILE ("-" for stdin) instead of flags
    #[arg(
        short,
        long,
        value_name = "FILE",
        conflicts_with_all = [
            "temperature", "pressure", "humidity", "altitude", "engine", "reference_jet",
            "ref_temperature", "ref_pressure", "ref_humidity", "ref_altitude",
        ]
    )]
    pub input: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Save the result to the logbook under this name
    #[arg(long, value_name = "NAME")]
    pub save: Option<String>,
    /// Notes stored with the saved setting
    #[arg(long, requires = "save")]
    pub notes: Option<String>,
    /// Logbook file (overrides config)
    #[arg(long)]
    pub logbook: Option<PathBuf>,
}

pub fn run(args: CalculateArgs, config: &CliConfig) -> Result<()> {
    let request = match &args.input {
        Some(path) => request_from_input(path)?,
        None => request_from_flags(&args, config)?,
    };

    let result = match calculate(&request) {
        Ok(result) => result,
        Err(err) => return Err(report_error(err, args.json)),
    };

    if args.json {
        print_json(&result)?;
    } else {
        print!("{}", render_result(&result));
    }

    if let Some(name) = args.save {
        let path = args.logbook.clone().unwrap_or_else(|| config.logbook_path());
        let mut entry = SavedSetting::new(name, request, result);
        entry.notes = args.notes;
        let id = update_logbook(&path, &config.user_id(), |logbook| Ok(logbook.add_entry(entry)))
            .with_context(|| format!("cannot save to logbook {}", path.display()))?;

        info!(%id, path = %path.display(), "saved setting");
        if !args.json {
            println!();
            println!("Saved as {id} in {}", path.display());
        }
    }

    Ok(())
}

fn request_from_input(path: &Path) -> Result<CalculationRequest> {
    let body = if path.as_os_str() == "-" {
        io::read_to_string(io::stdin()).context("failed to read request from stdin")?
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read request file {}", path.display()))?
    };
    let value: Value = serde_json::from_str(&body).context("request body is not valid JSON")?;
    Ok(request_from_json(&value)?)
}

/// Flags first, then config, then the engine profile defaults.
fn request_from_flags(args: &CalculateArgs, config: &CliConfig) -> Result<CalculationRequest> {
    let (Some(temperature), Some(pressure), Some(humidity)) =
        (args.temperature, args.pressure, args.humidity)
    else {
        bail!("--temperature, --pressure and --humidity are required (or pass --input)");
    };
    let current = EnvironmentalConditions::new(temperature, pressure, humidity)
        .with_altitude(args.altitude.unwrap_or(0.0));

    let engine = match args.engine {
        Some(engine) => engine,
        None => config.engine()?.unwrap_or_default(),
    };

    let mut request = CalculationRequest::new(current, engine);
    if let Some(reference) = reference_from_flags(args)?.or(config.reference) {
        request = request.with_reference(reference);
    }
    if let Some(jet) = args.reference_jet.or(config.reference_jet) {
        request = request.with_reference_jet(jet);
    }
    Ok(request)
}

fn reference_from_flags(args: &CalculateArgs) -> Result<Option<EnvironmentalConditions>> {
    match (args.ref_temperature, args.ref_pressure, args.ref_humidity) {
        (Some(t), Some(p), Some(h)) => Ok(Some(
            EnvironmentalConditions::new(t, p, h).with_altitude(args.ref_altitude.unwrap_or(0.0)),
        )),
        (None, None, None) if args.ref_altitude.is_none() => Ok(None),
        _ => bail!("--ref-temperature, --ref-pressure and --ref-humidity must be given together"),
    }
}

/// Print a core error as JSON when asked to, and hand it back for the exit code.
fn report_error(err: JetError, json: bool) -> anyhow::Error {
    if json {
        let body = serde_json::json!({
            "error": err.error_code(),
            "message": err.to_string(),
            "details": err,
        });
        println!("{body:#}");
    }
    anyhow::Error::new(err).context("calculation failed")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(t: f64, p: f64, h: f64) -> CalculateArgs {
        CalculateArgs {
            temperature: Some(t),
            pressure: Some(p),
            humidity: Some(h),
            ..Default::default()
        }
    }

    #[test]
    fn test_flags_use_profile_defaults() {
        let request = request_from_flags(&flags(20.0, 1013.25, 50.0), &CliConfig::default()).unwrap();
        assert_eq!(request.engine, EngineProfile::SeniorMaxEvo);
        assert_eq!(request.reference, None);
        assert_eq!(request.reference_jet, None);
    }

    #[test]
    fn test_flags_override_config() {
        let config = CliConfig {
            engine: Some("mini-max".into()),
            reference_jet: Some(120),
            reference: Some(EnvironmentalConditions::new(15.0, 1000.0, 40.0)),
            ..Default::default()
        };

        let from_config = request_from_flags(&flags(20.0, 1013.25, 50.0), &config).unwrap();
        assert_eq!(from_config.engine, EngineProfile::MiniMax);
        assert_eq!(from_config.reference_jet, Some(120));
        assert_eq!(from_config.reference.unwrap().temperature_c, 15.0);

        let mut args = flags(20.0, 1013.25, 50.0);
        args.engine = Some(EngineProfile::JuniorMaxEvo);
        args.reference_jet = Some(132);
        args.ref_temperature = Some(22.0);
        args.ref_pressure = Some(1005.0);
        args.ref_humidity = Some(60.0);
        let overridden = request_from_flags(&args, &config).unwrap();
        assert_eq!(overridden.engine, EngineProfile::JuniorMaxEvo);
        assert_eq!(overridden.reference_jet, Some(132));
        assert_eq!(overridden.reference.unwrap().temperature_c, 22.0);
    }

    #[test]
    fn test_missing_current_flag() {
        let mut args = flags(20.0, 1013.25, 50.0);
        args.humidity = None;
        assert!(request_from_flags(&args, &CliConfig::default()).is_err());
    }

    #[test]
    fn test_partial_reference_rejected() {
        let mut args = flags(20.0, 1013.25, 50.0);
        args.ref_temperature = Some(20.0);
        assert!(request_from_flags(&args, &CliConfig::default()).is_err());
    }

    #[test]
    fn test_request_from_input_file() {
        let path = std::env::temp_dir().join(format!("jetwise_request_{}.json", std::process::id()));
        fs::write(
            &path,
            r#"{"temperature": 35, "pressure": 1000, "humidity": 80, "engine_type": "Senior MAX EVO", "reference_jet": 175}"#,
        )
        .unwrap();

        let request = request_from_input(&path).unwrap();
        assert_eq!(request.reference_jet, Some(175));
        assert_eq!(request.current.humidity_pct, 80.0);

        let _ = fs::remove_file(&path);
    }
}
