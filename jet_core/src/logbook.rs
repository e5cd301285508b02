//! # Jetting Logbook
//!
//! The `Logbook` is the root container for saved settings: a label and notes
//! alongside the request that was calculated and the result it produced.
//! Logbooks serialize to human-readable JSON (see [`crate::file_io`]).
//!
//! ## Structure
//!
//! ```text
//! Logbook
//! ├── meta: LogbookMetadata (version, owner, timestamps)
//! └── entries: HashMap<Uuid, SavedSetting>
//! ```
//!
//! ## Example
//!
//! ```rust
//! use jet_core::logbook::Logbook;
//! use jet_core::calculations::CalculationRequest;
//! use jet_core::conditions::EnvironmentalConditions;
//! use jet_core::engines::EngineProfile;
//!
//! let mut logbook = Logbook::new("driver@example.com");
//! let request = CalculationRequest::new(
//!     EnvironmentalConditions::new(18.0, 1002.0, 62.0),
//!     EngineProfile::SeniorMaxEvo,
//! );
//! let id = logbook.record("Genk practice", Some("new plug".into()), request).unwrap();
//! assert!(logbook.get_entry(&id).is_some());
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{calculate, CalculationRequest, CalculationResult};
use crate::errors::{JetError, JetResult};

/// Current schema version for logbook files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root logbook container.
///
/// Entries are stored in a flat UUID-keyed map so ids stay stable when
/// entries are removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logbook {
    /// Logbook metadata (version, owner, timestamps)
    pub meta: LogbookMetadata,

    /// All saved settings, keyed by UUID
    pub entries: HashMap<Uuid, SavedSetting>,
}

impl Logbook {
    /// Create a new empty logbook.
    pub fn new(owner: impl Into<String>) -> Self {
        let now = Utc::now();
        Logbook {
            meta: LogbookMetadata {
                version: SCHEMA_VERSION.to_string(),
                owner: owner.into(),
                created: now,
                modified: now,
            },
            entries: HashMap::new(),
        }
    }

    /// Add a saved setting. Returns the UUID assigned to it.
    pub fn add_entry(&mut self, entry: SavedSetting) -> Uuid {
        let id = Uuid::new_v4();
        self.entries.insert(id, entry);
        self.touch();
        id
    }

    /// Calculate `request` and save it with the result under `name`.
    ///
    /// Nothing is stored when the calculation fails.
    pub fn record(
        &mut self,
        name: impl Into<String>,
        notes: Option<String>,
        request: CalculationRequest,
    ) -> JetResult<Uuid> {
        let result = calculate(&request)?;
        let mut entry = SavedSetting::new(name, request, result);
        entry.notes = notes;
        Ok(self.add_entry(entry))
    }

    /// Remove a saved setting by UUID.
    ///
    /// Returns the removed entry if it existed.
    pub fn remove_entry(&mut self, id: &Uuid) -> Option<SavedSetting> {
        let entry = self.entries.remove(id);
        if entry.is_some() {
            self.touch();
        }
        entry
    }

    /// Remove a saved setting, failing with `EntryNotFound` for unknown ids.
    pub fn take_entry(&mut self, id: &Uuid) -> JetResult<SavedSetting> {
        self.remove_entry(id)
            .ok_or_else(|| JetError::EntryNotFound { id: id.to_string() })
    }

    /// Get a saved setting by UUID.
    pub fn get_entry(&self, id: &Uuid) -> Option<&SavedSetting> {
        self.entries.get(id)
    }

    /// Entries oldest first (ties broken by id so the order is stable).
    pub fn entries_by_date(&self) -> Vec<(&Uuid, &SavedSetting)> {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_by(|(id_a, a), (id_b, b)| a.created.cmp(&b.created).then_with(|| id_a.cmp(id_b)));
        entries
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

impl Default for Logbook {
    fn default() -> Self {
        Logbook::new("")
    }
}

/// Logbook metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogbookMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Who keeps this logbook
    pub owner: String,

    /// When the logbook was created
    pub created: DateTime<Utc>,

    /// When the logbook was last modified
    pub modified: DateTime<Utc>,
}

/// One saved calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSetting {
    /// User label (e.g. "Genk, race 2")
    pub name: String,

    /// Free-form notes
    #[serde(default)]
    pub notes: Option<String>,

    /// What was asked
    pub request: CalculationRequest,

    /// What was recommended
    pub result: CalculationResult,

    /// When it was saved
    pub created: DateTime<Utc>,
}

impl SavedSetting {
    pub fn new(name: impl Into<String>, request: CalculationRequest, result: CalculationResult) -> Self {
        SavedSetting {
            name: name.into(),
            notes: None,
            request,
            result,
            created: Utc::now(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::EnvironmentalConditions;
    use crate::engines::EngineProfile;
    use chrono::Duration;

    fn request() -> CalculationRequest {
        CalculationRequest::new(
            EnvironmentalConditions::new(18.0, 1002.0, 62.0),
            EngineProfile::SeniorMaxEvo,
        )
    }

    #[test]
    fn test_logbook_creation() {
        let logbook = Logbook::new("driver@example.com");
        assert_eq!(logbook.meta.owner, "driver@example.com");
        assert_eq!(logbook.meta.version, SCHEMA_VERSION);
        assert_eq!(logbook.entry_count(), 0);
    }

    #[test]
    fn test_record_and_remove() {
        let mut logbook = Logbook::new("driver");
        let id = logbook.record("Practice", Some("fresh fuel".to_string()), request()).unwrap();
        assert_eq!(logbook.entry_count(), 1);

        let entry = logbook.get_entry(&id).unwrap();
        assert_eq!(entry.name, "Practice");
        assert_eq!(entry.notes.as_deref(), Some("fresh fuel"));
        assert_eq!(entry.result, calculate(&request()).unwrap());

        assert!(logbook.remove_entry(&id).is_some());
        assert_eq!(logbook.entry_count(), 0);
        assert!(logbook.remove_entry(&id).is_none());
    }

    #[test]
    fn test_record_rejects_invalid_request() {
        let mut logbook = Logbook::new("driver");
        let mut bad = request();
        bad.current.humidity_pct = -1.0;
        assert!(logbook.record("Bad", None, bad).unwrap_err().is_validation());
        assert_eq!(logbook.entry_count(), 0);
    }

    #[test]
    fn test_take_unknown_entry() {
        let mut logbook = Logbook::new("driver");
        let id = Uuid::new_v4();
        assert_eq!(
            logbook.take_entry(&id).unwrap_err(),
            JetError::EntryNotFound { id: id.to_string() }
        );
    }

    #[test]
    fn test_entries_by_date() {
        let mut logbook = Logbook::new("driver");
        let result = calculate(&request()).unwrap();

        let mut older = SavedSetting::new("Saturday", request(), result.clone());
        older.created -= Duration::days(1);
        let newer = SavedSetting::new("Sunday", request(), result).with_notes("rain");

        let newer_id = logbook.add_entry(newer);
        let older_id = logbook.add_entry(older);

        let ids: Vec<Uuid> = logbook.entries_by_date().into_iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![older_id, newer_id]);
    }

    #[test]
    fn test_logbook_serialization() {
        let mut logbook = Logbook::new("driver");
        logbook.record("Practice", None, request()).unwrap();

        let json = serde_json::to_string_pretty(&logbook).unwrap();
        assert!(json.contains("Practice"));
        assert!(json.contains("Senior MAX EVO"));

        let roundtrip: Logbook = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.entry_count(), 1);
        assert_eq!(roundtrip.meta.owner, "driver");
    }
}
