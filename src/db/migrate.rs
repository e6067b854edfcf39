//! Schema migrations.
//!
//! Each migration runs once, inside its own transaction, and is recorded in
//! the `log` table as `operation = 'migration_applied'`, `target = <version>`.
//! Databases written by earlier WorkLogger releases share the `timecards` layout
//! and are adopted in place.

use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};
use std::fmt;

struct Migration {
    version: &'static str,
    message: &'static str,
    apply: fn(&Connection) -> Result<()>,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20240101_0001_create_timecards",
        message: "Created timecards table",
        apply: create_timecards_table,
    },
    Migration {
        version: "20240101_0002_index_start_time",
        message: "Added index on timecards.start_time",
        apply: create_start_time_index,
    },
    Migration {
        version: "20240301_0003_backfill_null_descriptions",
        message: "Replaced NULL descriptions with empty text",
        apply: backfill_null_descriptions,
    },
];

/// A migration that ran during this call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMigration {
    pub version: &'static str,
    pub message: &'static str,
}

impl fmt::Display for AppliedMigration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.version, self.message)
    }
}

/// Print one line per applied migration. Only commands that manage the
/// schema on purpose call this; ordinary commands upgrade silently.
pub fn report_applied(applied: &[AppliedMigration]) {
    for m in applied {
        success(format!("Migration applied: {}", m));
    }
}

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn create_timecards_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS timecards (
            id          INTEGER PRIMARY KEY,
            start_time  TEXT NOT NULL,
            end_time    TEXT NOT NULL,
            valid       INTEGER NOT NULL,
            description TEXT DEFAULT ''
        );
        "#,
    )?;
    Ok(())
}

fn create_start_time_index(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_timecards_start_time ON timecards(start_time);",
    )?;
    Ok(())
}

fn backfill_null_descriptions(conn: &Connection) -> Result<()> {
    conn.execute(
        "UPDATE timecards SET description = '' WHERE description IS NULL",
        [],
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Run all pending migrations, returning the ones that ran. Prints nothing.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<Vec<AppliedMigration>> {
    ensure_log_table(conn)?;

    let mut applied = Vec::new();

    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }

        let tx = conn.unchecked_transaction()?;
        (m.apply)(&tx)
            .map_err(|e| AppError::Migration(format!("{} failed: {}", m.version, e)))?;
        tx.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
            [m.version, m.message],
        )?;
        tx.commit()?;

        applied.push(AppliedMigration {
            version: m.version,
            message: m.message,
        });
    }

    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_columns(conn: &Connection, table: &str) -> Vec<String> {
        let mut stmt = conn
            .prepare(&format!("PRAGMA table_info('{table}')"))
            .unwrap();
        stmt.query_map([], |row| row.get::<_, String>(1))
            .unwrap()
            .map(|c| c.unwrap())
            .collect()
    }

    #[test]
    fn schema_matches_data_model() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(run_pending_migrations(&conn).unwrap().len(), MIGRATIONS.len());
        assert_eq!(
            table_columns(&conn, "timecards"),
            vec!["id", "start_time", "end_time", "valid", "description"]
        );
    }

    #[test]
    fn applied_migrations_are_listed_in_order() {
        let conn = Connection::open_in_memory().unwrap();
        let applied = run_pending_migrations(&conn).unwrap();

        assert_eq!(applied[0].version, "20240101_0001_create_timecards");
        assert_eq!(
            applied[0].to_string(),
            "20240101_0001_create_timecards → Created timecards table"
        );
    }

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        assert!(run_pending_migrations(&conn).unwrap().is_empty());
    }

    #[test]
    fn legacy_null_descriptions_are_backfilled() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE timecards (
                id INTEGER PRIMARY KEY,
                start_time TEXT NOT NULL,
                end_time TEXT NOT NULL,
                valid INTEGER NOT NULL,
                description TEXT
            );
            INSERT INTO timecards(start_time, end_time, valid, description)
            VALUES ('2024-01-01 09:00:00', '2024-01-01 10:00:00', 1, NULL);",
        )
        .unwrap();

        run_pending_migrations(&conn).unwrap();

        let desc: Option<String> = conn
            .query_row("SELECT description FROM timecards", [], |r| r.get(0))
            .unwrap();
        assert_eq!(desc.as_deref(), Some(""));
    }
}
