use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::import::ImportLogic;
use crate::db::store::SqliteStore;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { file } = cmd {
        let store = SqliteStore::open(&cfg.database)?;
        let outcome = ImportLogic::import_file(&store, Path::new(file))?;

        success(format!(
            "Import complete: {} timecards added.",
            outcome.imported
        ));
        if outcome.skipped > 0 {
            info(format!("{} already present, skipped.", outcome.skipped));
        }
    }

    Ok(())
}
