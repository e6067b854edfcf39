use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::migrate::report_applied;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

/// Create the configuration (outside test mode) and bring the database
/// schema up to date. Running it twice is harmless.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    cfg.init_all(cli.test)?;

    println!("⚙️  Initializing WorkLogger…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", &cfg.database);

    let (pool, applied) = DbPool::open_with_migrations(&cfg.database)?;
    report_applied(&applied);
    if let Err(e) = pool.audit("init", "database", &format!("Database ready at {}", cfg.database)) {
        warning(format!("Failed to write the audit log: {}", e));
    }

    success(format!("Database initialized at {}", &cfg.database));
    Ok(())
}
