use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::tracker::SessionTracker;
use crate::db::store::SqliteStore;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::formatting::format_hours;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        start,
        end,
        invalid,
        description,
    } = cmd
    {
        let store = SqliteStore::open(&cfg.database)?;
        let tracker = SessionTracker::new(&store);

        let card = tracker.manual_add(
            start,
            end,
            !*invalid,
            description.as_deref().unwrap_or(""),
        )?;

        success(format!(
            "Timecard {} added: {} → {} ({} h{})",
            card.id.unwrap_or_default(),
            card.start_str(),
            card.end_str(),
            format_hours(card.hours()),
            if card.valid { "" } else { ", invalid" }
        ));
    }

    Ok(())
}
