use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::{report_applied, run_pending_migrations};
use crate::db::pool::DbPool;
use crate::db::stats::print_db_info;
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success};
use crate::utils::colors::{CYAN, RESET};
use rusqlite::Connection;

/// Maintenance on the timecard database. Steps run in a fixed order:
/// migrate, info, check, vacuum.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    {
        if !(*migrate || *check || *vacuum || *show_info) {
            info("Nothing to do: pass --info, --check, --vacuum or --migrate.");
            return Ok(());
        }

        let pool = DbPool::new(&cfg.database)?;

        // info reads the timecards and log tables, so it needs the schema too
        if *migrate || *show_info {
            step("Running migrations");
            let applied = run_pending_migrations(&pool.conn)?;
            report_applied(&applied);
            success(format!("Migration completed ({} applied).", applied.len()));
        }

        if *show_info {
            print_db_info(&pool.conn, &cfg.database)?;
        }

        if *check {
            integrity_check(&pool.conn)?;
        }

        if *vacuum {
            step("Running VACUUM");
            pool.conn.execute_batch("VACUUM;")?;
            success("Vacuum completed.");
        }
    }

    Ok(())
}

fn step(what: &str) {
    println!("{}▶ {}…{}", CYAN, what, RESET);
}

fn integrity_check(conn: &Connection) -> AppResult<()> {
    step("Running integrity check");
    let result: String = conn.query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

    if result == "ok" {
        success("Integrity check passed.");
    } else {
        error(format!("Integrity check failed: {}", result));
    }
    Ok(())
}
