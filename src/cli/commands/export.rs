use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logic::Core;
use crate::db::store::SqliteStore;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        filter,
        force,
    } = cmd
    {
        let filter = filter.resolve()?;
        let store = SqliteStore::open(&cfg.database)?;
        let report = Core::load_report(&store, filter, cfg.pay_params())?;
        ExportLogic::export(&report, *format, file, *force, &cfg.payment_method_label)?;
    }
    Ok(())
}
