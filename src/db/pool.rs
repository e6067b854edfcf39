//! Short-lived SQLite connections: one `DbPool` per command or store call.

use crate::db::log::write_entry;
use crate::db::migrate::{AppliedMigration, run_pending_migrations};
use crate::errors::AppResult;
use rusqlite::Connection;
use std::fs;
use std::path::Path;
use std::time::Duration;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    /// Open `path` as it is. The schema is left alone.
    pub fn new(path: &str) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path))?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(Self { conn })
    }

    /// Open `path`, creating its folder if needed, and apply pending migrations.
    pub fn open_migrated(path: &str) -> AppResult<Self> {
        Ok(Self::open_with_migrations(path)?.0)
    }

    /// Like `open_migrated`, also returning the migrations that ran.
    pub fn open_with_migrations(path: &str) -> AppResult<(Self, Vec<AppliedMigration>)> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let pool = Self::new(path)?;
        let applied = run_pending_migrations(&pool.conn)?;
        Ok((pool, applied))
    }

    pub fn audit(&self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        write_entry(&self.conn, operation, target, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn open_migrated_creates_missing_folder() {
        let dir = env::temp_dir().join("worklogger_pool_nested");
        fs::remove_dir_all(&dir).ok();
        let path = dir.join("sub").join("cards.sqlite");

        let pool = DbPool::open_migrated(&path.to_string_lossy()).unwrap();
        let tables: i64 = pool
            .conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE name IN ('timecards', 'log')",
                [],
                |r| r.get(0),
            )
            .unwrap();

        assert_eq!(tables, 2);
    }
}
