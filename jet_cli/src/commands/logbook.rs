use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use jet_core::file_io::read_logbook;
use jet_core::{update_logbook, JetError, JetResult, Logbook};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use super::print_json;
use crate::config::CliConfig;
use crate::report::render_entry;

#[derive(Args, Debug, Default)]
pub struct HistoryArgs {
    /// Logbook file (overrides config)
    #[arg(long)]
    pub logbook: Option<PathBuf>,
    /// Print the entries as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Default)]
pub struct RemoveArgs {
    /// Entry id, or a unique prefix of it
    pub id: String,
    /// Logbook file (overrides config)
    #[arg(long)]
    pub logbook: Option<PathBuf>,
}

#[derive(Serialize)]
struct HistoryItem<'a> {
    id: &'a Uuid,
    #[serde(flatten)]
    entry: &'a jet_core::SavedSetting,
}

pub fn history(args: HistoryArgs, config: &CliConfig) -> Result<()> {
    let path = args.logbook.unwrap_or_else(|| config.logbook_path());
    if !path.exists() {
        if args.json {
            return print_json(&Vec::<()>::new());
        }
        println!("No saved settings ({} does not exist)", path.display());
        return Ok(());
    }

    let (logbook, holder) = read_logbook(&path)
        .with_context(|| format!("failed to load logbook {}", path.display()))?;
    if let Some(holder) = holder {
        warn!(owner = %holder.owner, pid = holder.pid, "logbook is being edited elsewhere");
    }

    let entries = logbook.entries_by_date();
    if args.json {
        let items: Vec<HistoryItem> = entries
            .into_iter()
            .map(|(id, entry)| HistoryItem { id, entry })
            .collect();
        return print_json(&items);
    }

    if entries.is_empty() {
        println!("No saved settings in {}", path.display());
    }
    for (id, entry) in entries {
        println!("{}", render_entry(&id.to_string(), entry));
    }
    Ok(())
}

pub fn remove(args: RemoveArgs, config: &CliConfig) -> Result<()> {
    let path = args.logbook.unwrap_or_else(|| config.logbook_path());
    if !path.exists() {
        bail!("no logbook at {}", path.display());
    }

    let (id, removed) = update_logbook(&path, &config.user_id(), |logbook| {
        let id = resolve_id(logbook, &args.id)?;
        Ok((id, logbook.take_entry(&id)?))
    })
    .with_context(|| format!("cannot remove from logbook {}", path.display()))?;

    info!(%id, path = %path.display(), "removed setting");
    println!("Removed '{}' ({id})", removed.name);
    Ok(())
}

/// Full id, or the single entry whose id starts with `needle`.
fn resolve_id(logbook: &Logbook, needle: &str) -> JetResult<Uuid> {
    if let Ok(id) = needle.parse::<Uuid>() {
        return Ok(id);
    }

    let needle = needle.to_ascii_lowercase();
    let matches: Vec<&Uuid> = logbook
        .entries
        .keys()
        .filter(|id| id.to_string().starts_with(&needle))
        .collect();

    match matches.as_slice() {
        [id] => Ok(**id),
        [] => Err(JetError::EntryNotFound { id: needle }),
        _ => Err(JetError::invalid_input(
            "id",
            needle.as_str(),
            format!("matches {} saved settings, give more of the id", matches.len()),
        )),
    }
}
