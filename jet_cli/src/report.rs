//! Plain-text rendering of results and logbook entries.

use std::fmt::Write;

use jet_core::engines::EngineSpec;
use jet_core::equations::dew_point;
use jet_core::{CalculationResult, EngineProfile, EnvironmentalConditions, SavedSetting};

fn conditions_line(c: &EnvironmentalConditions) -> String {
    format!(
        "{:.1} °C  {:.2} hPa  {:.0} %RH  {:.0} m",
        c.temperature_c, c.pressure_hpa, c.humidity_pct, c.altitude_m
    )
}

/// Human report for one calculation.
pub fn render_result(result: &CalculationResult) -> String {
    let inputs = &result.inputs;
    let recs = &result.recommendations;
    let calc = &result.calculations;
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "Jetting for {}", inputs.engine);
    let _ = writeln!(out, "  Conditions    {}", conditions_line(&inputs.current));
    let _ = writeln!(
        out,
        "  Baseline      {}  (jet {})",
        conditions_line(&inputs.reference),
        inputs.reference_jet
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "  Main jet      {}  (raw {:.2})", recs.main_jet, calc.raw_main_jet);
    let _ = writeln!(out, "  Needle clip   {}", recs.needle_position);
    let _ = writeln!(out, "  Float height  {:.1} mm", recs.float_height_mm);
    let _ = writeln!(out, "  Needle        {}", recs.needle_type);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  Air density   {:.4} kg/m³ (baseline {:.4}, ratio {:.4})",
        calc.current_air_density, calc.reference_air_density, calc.density_ratio
    );
    match dew_point(inputs.current.temperature(), inputs.current.humidity()) {
        Some(td) => {
            let _ = writeln!(out, "  Dew point     {:.1} °C", td.0);
        }
        None => {
            let _ = writeln!(out, "  Dew point     n/a (dry air)");
        }
    }

    if result.has_warnings() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Warnings:");
        for warning in &result.warnings {
            let _ = writeln!(out, "  ! [{}] {}", warning.code.as_str(), warning.message);
        }
    }

    out
}

/// One block per engine profile.
pub fn render_engine(engine: EngineProfile, spec: &EngineSpec) -> String {
    let table = &spec.jet_sizes;
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", engine, engine.slug());
    let _ = writeln!(
        out,
        "  Jets          {}..={} step {} ({} sizes)",
        table.smallest,
        table.largest,
        table.increment,
        table.len()
    );
    let _ = writeln!(
        out,
        "  Typical jets  {}..={}",
        spec.typical_jet_range.0, spec.typical_jet_range.1
    );
    let _ = writeln!(out, "  Reference jet {}", spec.default_reference_jet);
    let _ = writeln!(out, "  Baseline      {}", conditions_line(&spec.default_reference));
    let _ = writeln!(
        out,
        "  Needle clip   {} (range {}..={})",
        spec.baseline_needle_position, spec.min_needle_position, spec.max_needle_position
    );
    let _ = writeln!(out, "  Float base    {:.1} mm", spec.float_height_base_mm);
    let _ = writeln!(out, "  Vol. eff.     {:.2}", spec.volumetric_efficiency);
    out
}

/// One line per saved setting.
pub fn render_entry(id: &str, entry: &SavedSetting) -> String {
    let recs = &entry.result.recommendations;
    let mut line = format!(
        "{}  {}  {:<20} {:<15} jet {:>3}  clip {}  float {:.1}  {}",
        &id[..8.min(id.len())],
        entry.created.format("%Y-%m-%d %H:%M"),
        entry.name,
        entry.request.engine.to_string(),
        recs.main_jet,
        recs.needle_position,
        recs.float_height_mm,
        recs.needle_type
    );
    if let Some(notes) = &entry.notes {
        let _ = write!(line, "  # {notes}");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use jet_core::{calculate, CalculationRequest};

    fn scenario_b() -> CalculationResult {
        let request = CalculationRequest::new(
            EnvironmentalConditions::new(35.0, 1000.0, 80.0),
            EngineProfile::SeniorMaxEvo,
        )
        .with_reference(EnvironmentalConditions::new(20.0, 1013.25, 50.0))
        .with_reference_jet(175);
        calculate(&request).unwrap()
    }

    #[test]
    fn test_result_report_lists_settings_and_warnings() {
        let report = render_result(&scenario_b());
        assert!(report.contains("Jetting for Senior MAX EVO"));
        assert!(report.contains("Main jet      172"));
        assert!(report.contains("Needle        K98"));
        assert!(report.contains("Warnings:"));
        assert!(report.contains("[outside_calibration_envelope]"));
    }

    #[test]
    fn test_dry_air_has_no_dew_point() {
        let baseline = EngineProfile::MiniMax.spec().default_reference;
        let result = calculate(&CalculationRequest::new(baseline, EngineProfile::MiniMax)).unwrap();
        assert!(render_result(&result).contains("n/a (dry air)"));
    }

    #[test]
    fn test_engine_block() {
        let engine = EngineProfile::JuniorMaxEvo;
        let block = render_engine(engine, engine.spec());
        assert!(block.contains("junior-max-evo"));
        assert!(block.contains("110..=170 step 2 (31 sizes)"));
        assert!(block.contains("Typical jets  124..=136"));
    }

    #[test]
    fn test_entry_line_includes_notes() {
        let request = CalculationRequest::new(
            EnvironmentalConditions::new(35.0, 1000.0, 80.0),
            EngineProfile::SeniorMaxEvo,
        );
        let result = calculate(&request).unwrap();
        let entry = SavedSetting::new("Heat race", request, result).with_notes("hot track");
        let line = render_entry("0123456789abcdef", &entry);
        assert!(line.starts_with("01234567  "));
        assert!(line.contains("Heat race"));
        assert!(line.ends_with("# hot track"));
    }
}
