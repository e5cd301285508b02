pub mod calculate;
pub mod engines;
pub mod logbook;

use anyhow::{Context, Result};
use serde::Serialize;

/// Pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{json}");
    Ok(())
}
