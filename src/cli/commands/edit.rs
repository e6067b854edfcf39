use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::tracker::SessionTracker;
use crate::db::store::{SqliteStore, TimeCardStore};
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        id,
        start,
        end,
        invalid,
        description,
    } = cmd
    {
        let store = SqliteStore::open(&cfg.database)?;

        // without --desc the stored description is kept
        let description = match description {
            Some(d) => d.clone(),
            None => store
                .fetch_all()?
                .into_iter()
                .find(|c| c.id == Some(*id))
                .map(|c| c.description)
                .unwrap_or_default(),
        };

        let tracker = SessionTracker::new(&store);
        if tracker.edit(*id, start, end, !*invalid, &description)? {
            success(format!("Timecard {} updated.", id));
        } else {
            warning(format!("No timecard with id {}: nothing changed.", id));
        }
    }

    Ok(())
}
