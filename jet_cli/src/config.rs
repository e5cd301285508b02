//! TOML configuration for the CLI.
//!
//! Looked up in order: `--config PATH`, `$JETTING_CONFIG`, `./jetting.toml`.
//! The first two must exist when given; the last one is optional.
//!
//! ```toml
//! engine = "Senior MAX EVO"
//! reference_jet = 130
//! logbook = "jetting-log.json"
//! user = "driver@example.com"
//!
//! [reference]
//! temperature_c = 20.0
//! pressure_hpa = 1013.25
//! humidity_pct = 50.0
//! altitude_m = 150.0
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use jet_core::{EngineProfile, EnvironmentalConditions};
use serde::Deserialize;
use tracing::debug;

pub const CONFIG_ENV_VAR: &str = "JETTING_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "jetting.toml";
pub const DEFAULT_LOGBOOK_FILE: &str = "jetting-log.json";

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Default engine profile (display name, variant name or slug)
    pub engine: Option<String>,
    pub reference_jet: Option<u32>,
    pub logbook: Option<PathBuf>,
    /// Lock owner recorded in `.lock` files
    pub user: Option<String>,
    /// Calibration baseline used when no `--ref-*` flags are given
    pub reference: Option<EnvironmentalConditions>,
}

impl CliConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse jetting config TOML")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Load the config from the first location that applies.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let from_env = env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        match locate(explicit, from_env, Path::new(DEFAULT_CONFIG_FILE).exists()) {
            Some(path) => {
                debug!(path = %path.display(), "loading config");
                Self::from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn engine(&self) -> Result<Option<EngineProfile>> {
        self.engine
            .as_deref()
            .map(|name| {
                name.parse::<EngineProfile>()
                    .with_context(|| format!("config: unknown engine '{name}'"))
            })
            .transpose()
    }

    pub fn logbook_path(&self) -> PathBuf {
        self.logbook
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOGBOOK_FILE))
    }

    pub fn user_id(&self) -> String {
        self.user.clone().unwrap_or_else(whoami::username)
    }
}

fn locate(explicit: Option<&Path>, from_env: Option<PathBuf>, default_exists: bool) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or(from_env)
        .or_else(|| default_exists.then(|| PathBuf::from(DEFAULT_CONFIG_FILE)))
}
