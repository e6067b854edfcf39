use crate::errors::{AppError, AppResult};
use crate::models::timecard::TimeCard;
use crate::utils::time::{TIMESTAMP_FORMAT, format_timestamp};
use chrono::NaiveDateTime;
use rusqlite::params;
use rusqlite::{Connection, Result, Row};

const SELECT_COLUMNS: &str = "SELECT id, start_time, end_time, valid, description FROM timecards";

fn parse_column(raw: String, column: usize) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            column,
            rusqlite::types::Type::Text,
            Box::new(AppError::Validation(format!(
                "stored timestamp '{}' is not YYYY-MM-DD HH:MM:SS",
                raw
            ))),
        )
    })
}

pub fn map_row(row: &Row) -> Result<TimeCard> {
    let start = parse_column(row.get("start_time")?, 1)?;
    let end = parse_column(row.get("end_time")?, 2)?;

    Ok(TimeCard {
        id: Some(row.get("id")?),
        start,
        end,
        valid: row.get::<_, i64>("valid")? != 0,
        description: row
            .get::<_, Option<String>>("description")?
            .unwrap_or_default(),
    })
}

/// Insert a card and return the id SQLite assigned to it.
pub fn insert_timecard(conn: &Connection, card: &TimeCard) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO timecards (start_time, end_time, valid, description)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            card.start_str(),
            card.end_str(),
            if card.valid { 1 } else { 0 },
            card.description,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// All cards, oldest start first. Equal start times fall back to insertion order.
pub fn load_timecards(conn: &Connection) -> AppResult<Vec<TimeCard>> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_COLUMNS} ORDER BY start_time ASC, id ASC"
    ))?;

    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Overwrite every mutable field of card `id`. Returns the number of rows
/// changed, which is 0 when no card has that id.
pub fn update_timecard(
    conn: &Connection,
    id: i64,
    start: &NaiveDateTime,
    end: &NaiveDateTime,
    valid: bool,
    description: &str,
) -> AppResult<usize> {
    let changed = conn.execute(
        "UPDATE timecards
         SET start_time = ?1, end_time = ?2, valid = ?3, description = ?4
         WHERE id = ?5",
        params![
            format_timestamp(start),
            format_timestamp(end),
            if valid { 1 } else { 0 },
            description,
            id,
        ],
    )?;
    Ok(changed)
}
