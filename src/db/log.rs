//! Audit trail rows in the `log` table.

use crate::errors::AppResult;
use chrono::Local;
use rusqlite::{Connection, params};

/// Append one audit row stamped with the local time (RFC 3339).
pub fn write_entry(conn: &Connection, operation: &str, target: &str, message: &str) -> AppResult<()> {
    conn.prepare_cached("INSERT INTO log (date, operation, target, message) VALUES (?1, ?2, ?3, ?4)")?
        .execute(params![Local::now().to_rfc3339(), operation, target, message])?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrate::run_pending_migrations;

    #[test]
    fn entries_follow_the_migration_rows() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();

        write_entry(&conn, "edit", "7", "2024-03-04 09:00:00 -> 2024-03-04 10:00:00").unwrap();

        let (op, target, date): (String, String, String) = conn
            .query_row(
                "SELECT operation, target, date FROM log ORDER BY id DESC LIMIT 1",
                [],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
            )
            .unwrap();
        assert_eq!((op.as_str(), target.as_str()), ("edit", "7"));
        assert!(chrono::DateTime::parse_from_rfc3339(&date).is_ok());
    }
}
