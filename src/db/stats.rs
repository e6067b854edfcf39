//! Figures shown by `db --info`.

use crate::db::queries::load_timecards;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::formatting::format_hours;
use chrono::NaiveDate;
use rusqlite::Connection;
use std::fs;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DbStats {
    pub size_bytes: u64,
    pub total: usize,
    pub valid: usize,
    pub valid_hours: f64,
    pub first_day: Option<NaiveDate>,
    pub last_day: Option<NaiveDate>,
    pub migrations: i64,
}

impl DbStats {
    pub fn gather(conn: &Connection, db_path: &str) -> AppResult<DbStats> {
        let cards = load_timecards(conn)?;
        let migrations = conn.query_row(
            "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
            [],
            |row| row.get(0),
        )?;

        Ok(DbStats {
            size_bytes: fs::metadata(db_path).map(|m| m.len()).unwrap_or(0),
            total: cards.len(),
            valid: cards.iter().filter(|c| c.valid).count(),
            valid_hours: cards
                .iter()
                .filter(|c| c.valid)
                .fold(0.0, |acc, c| acc + c.hours()),
            // cards come back ordered by start time
            first_day: cards.first().map(|c| c.date()),
            last_day: cards.last().map(|c| c.date()),
            migrations,
        })
    }

    /// Cards per calendar day between the first and last start date.
    pub fn cards_per_day(&self) -> Option<f64> {
        let days = (self.last_day? - self.first_day?).num_days() + 1;
        Some(self.total as f64 / days as f64)
    }
}

pub fn print_db_info(conn: &Connection, db_path: &str) -> AppResult<()> {
    let stats = DbStats::gather(conn, db_path)?;
    let day = |d: Option<NaiveDate>| {
        d.map(|d| d.to_string())
            .unwrap_or_else(|| format!("{GREY}--{RESET}"))
    };

    println!();
    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, stats.size_bytes as f64 / 1024.0);
    println!(
        "{}• Timecards:{} {}{}{} ({} valid, {} invalid)",
        CYAN,
        RESET,
        GREEN,
        stats.total,
        RESET,
        stats.valid,
        stats.total - stats.valid
    );
    println!("{}• Valid hours:{} {}", CYAN, RESET, format_hours(stats.valid_hours));
    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", day(stats.first_day));
    println!("    to:   {}", day(stats.last_day));
    if let Some(avg) = stats.cards_per_day() {
        println!("{}• Average timecards/day:{} {:.2}", CYAN, RESET, avg);
    }
    println!("{}• Migrations applied:{} {}", CYAN, RESET, stats.migrations);
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrate::run_pending_migrations;
    use crate::db::queries::insert_timecard;
    use crate::models::timecard::TimeCard;

    #[test]
    fn gather_counts_cards_and_valid_hours() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        for (s, e, valid) in [
            ("2024-03-01 09:00:00", "2024-03-01 12:00:00", true),
            ("2024-03-01 13:00:00", "2024-03-01 14:00:00", false),
            ("2024-03-04 08:00:00", "2024-03-04 09:30:00", true),
        ] {
            insert_timecard(&conn, &TimeCard::parse(s, e, valid, "").unwrap()).unwrap();
        }

        let stats = DbStats::gather(&conn, ":memory:").unwrap();

        assert_eq!((stats.total, stats.valid), (3, 2));
        assert_eq!(stats.valid_hours, 4.5);
        assert_eq!(stats.first_day, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(stats.cards_per_day(), Some(0.75));
        assert!(stats.migrations >= 1);
    }

    #[test]
    fn empty_database_has_no_range() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();

        let stats = DbStats::gather(&conn, ":memory:").unwrap();

        assert_eq!(stats.total, 0);
        assert_eq!(stats.cards_per_day(), None);
        assert_eq!(format_hours(stats.valid_hours), "0.00");
    }
}
