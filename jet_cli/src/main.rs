//! # Jetwise CLI
//!
//! Command-line front end for `jet_core`: calculate jetting from flags or a
//! JSON request, list engine profiles, and keep a logbook of saved settings.
//!
//! ```text
//! jet-cli calculate --temperature 35 --pressure 1000 --humidity 80 \
//!     --ref-temperature 20 --ref-pressure 1013.25 --ref-humidity 50 --reference-jet 175
//! jet-cli calculate --input request.json --json --save "Genk race 2"
//! jet-cli history
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod report;

use commands::calculate::CalculateArgs;
use commands::engines::EnginesArgs;
use commands::logbook::{HistoryArgs, RemoveArgs};
use config::CliConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Kart carburetor jetting calculator", long_about = None)]
struct Cli {
    /// Config file (default: $JETTING_CONFIG, then ./jetting.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recommend jetting for the given conditions
    Calculate(CalculateArgs),
    /// List engine profiles and their calibration data
    Engines(EnginesArgs),
    /// List saved settings, oldest first
    History(HistoryArgs),
    /// Delete a saved setting
    Remove(RemoveArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout is reserved for reports and JSON
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Calculate(args) => commands::calculate::run(args, &config),
        Command::Engines(args) => commands::engines::run(args),
        Command::History(args) => commands::logbook::history(args, &config),
        Command::Remove(args) => commands::logbook::remove(args, &config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use jet_core::EngineProfile;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_calculate_flags() {
        let cli = Cli::try_parse_from([
            "jet-cli",
            "calculate",
            "--temperature",
            "-5",
            "--pressure",
            "1030",
            "--humidity",
            "70",
            "--engine",
            "mini-max",
            "--save",
            "Cold morning",
            "--notes",
            "frost on the grid",
        ])
        .unwrap();

        let Command::Calculate(args) = cli.command else {
            panic!("expected calculate");
        };
        assert_eq!(args.temperature, Some(-5.0));
        assert_eq!(args.engine, Some(EngineProfile::MiniMax));
        assert_eq!(args.save.as_deref(), Some("Cold morning"));
    }

    #[test]
    fn test_input_conflicts_with_flags() {
        let parsed = Cli::try_parse_from([
            "jet-cli",
            "calculate",
            "--input",
            "req.json",
            "--temperature",
            "20",
        ]);
        assert!(parsed.is_err());

        // Engine and baseline come from the body too
        for extra in [
            ["--engine", "mini-max"],
            ["--reference-jet", "130"],
            ["--ref-temperature", "15"],
            ["--altitude", "300"],
        ] {
            let mut argv = vec!["jet-cli", "calculate", "--input", "req.json"];
            argv.extend(extra);
            assert!(Cli::try_parse_from(argv).is_err(), "{extra:?} should conflict");
        }
    }

    #[test]
    fn test_notes_require_save() {
        let parsed = Cli::try_parse_from(["jet-cli", "calculate", "--input", "-", "--notes", "x"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["jet-cli", "history", "-v", "--config", "alt.toml"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
    }

    #[test]
    fn test_unknown_engine_rejected_by_parser() {
        let parsed = Cli::try_parse_from([
            "jet-cli",
            "calculate",
            "--temperature",
            "20",
            "--pressure",
            "1013",
            "--humidity",
            "50",
            "--engine",
            "kz2",
        ]);
        assert!(parsed.is_err());
    }
}
