//! Persistent store contract for timecards and its SQLite implementation.

use crate::db::pool::DbPool;
use crate::db::queries::{insert_timecard, load_timecards, update_timecard};
use crate::errors::AppResult;
use crate::models::timecard::TimeCard;
use chrono::NaiveDateTime;

/// Durable create/read/update over timecards. Records are never deleted.
pub trait TimeCardStore {
    /// Persist `card` under a freshly assigned id and return that id.
    /// Duplicate intervals are accepted.
    fn insert(&self, card: &TimeCard) -> AppResult<i64>;

    /// Every card, sorted ascending by start time.
    fn fetch_all(&self) -> AppResult<Vec<TimeCard>>;

    /// Overwrite all mutable fields of card `id`.
    ///
    /// A missing id is not an error: nothing is written and `Ok(false)` is
    /// returned.
    fn update(
        &self,
        id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
        valid: bool,
        description: &str,
    ) -> AppResult<bool>;

    /// Record an operation in the store's audit trail, if it keeps one.
    fn audit(&self, _operation: &str, _target: &str, _message: &str) -> AppResult<()> {
        Ok(())
    }
}

/// SQLite-backed store. Every call opens its own connection, runs a single
/// statement (auto-committed) and closes the connection on return.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: String,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `path` and apply pending
    /// migrations. `path` must be a file: an in-memory database would not
    /// survive between calls.
    pub fn open(path: &str) -> AppResult<Self> {
        DbPool::open_migrated(path)?;

        Ok(Self {
            path: path.to_string(),
        })
    }

    fn connect(&self) -> AppResult<DbPool> {
        DbPool::new(&self.path)
    }
}

impl TimeCardStore for SqliteStore {
    fn insert(&self, card: &TimeCard) -> AppResult<i64> {
        let pool = self.connect()?;
        insert_timecard(&pool.conn, card)
    }

    fn fetch_all(&self) -> AppResult<Vec<TimeCard>> {
        let pool = self.connect()?;
        load_timecards(&pool.conn)
    }

    fn update(
        &self,
        id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
        valid: bool,
        description: &str,
    ) -> AppResult<bool> {
        let pool = self.connect()?;
        let changed = update_timecard(&pool.conn, id, &start, &end, valid, description)?;
        Ok(changed > 0)
    }

    fn audit(&self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        self.connect()?.audit(operation, target, message)
    }
}
