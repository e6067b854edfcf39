//! Import of the old JSON timecard log into the store.

use crate::db::store::TimeCardStore;
use crate::errors::{AppError, AppResult};
use crate::models::timecard::TimeCard;
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct LegacyEntry {
    start_time: String,
    end_time: String,
    #[serde(default = "default_valid")]
    valid: bool,
    #[serde(default)]
    description: Option<String>,
}

fn default_valid() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportOutcome {
    pub imported: usize,
    pub skipped: usize,
}

pub struct ImportLogic;

impl ImportLogic {
    pub fn import_file<S: TimeCardStore>(store: &S, path: &Path) -> AppResult<ImportOutcome> {
        let content = fs::read_to_string(path)?;
        let outcome = Self::import_str(store, &content)?;

        if let Err(e) = store.audit(
            "import",
            &path.to_string_lossy(),
            &format!("{} imported, {} skipped", outcome.imported, outcome.skipped),
        ) {
            crate::ui::messages::warning(format!("Could not write the import log entry: {}", e));
        }

        Ok(outcome)
    }

    /// Insert every entry of a JSON array whose `(start, end)` pair is not
    /// stored yet. All entries are parsed first: one bad timestamp aborts
    /// the import before anything is written.
    pub fn import_str<S: TimeCardStore>(store: &S, json: &str) -> AppResult<ImportOutcome> {
        let entries: Vec<LegacyEntry> = serde_json::from_str(json)
            .map_err(|e| AppError::Import(format!("malformed timecard file: {e}")))?;

        let cards = entries
            .into_iter()
            .map(|e| {
                TimeCard::parse(
                    &e.start_time,
                    &e.end_time,
                    e.valid,
                    e.description.as_deref().unwrap_or(""),
                )
            })
            .collect::<AppResult<Vec<_>>>()?;

        let mut seen: HashSet<(NaiveDateTime, NaiveDateTime)> = store
            .fetch_all()?
            .into_iter()
            .map(|c| (c.start, c.end))
            .collect();

        let mut outcome = ImportOutcome::default();
        for card in cards {
            if !seen.insert((card.start, card.end)) {
                outcome.skipped += 1;
                continue;
            }
            store.insert(&card)?;
            outcome.imported += 1;
        }

        Ok(outcome)
    }
}
