//! Clock-in / clock-out state machine and manual entry over a [`TimeCardStore`].

use crate::db::store::TimeCardStore;
use crate::errors::{AppError, AppResult};
use crate::models::session::SessionState;
use crate::models::timecard::TimeCard;
use crate::ui::messages::warning;
use crate::utils::clock::{Clock, SystemClock};
use crate::utils::time::{format_timestamp, parse_timestamp};
use chrono::{NaiveDateTime, TimeDelta};

/// Snapshot returned by [`SessionTracker::current_session_state`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStatus {
    pub state: SessionState,
    pub started_at: Option<NaiveDateTime>,
    pub elapsed: Option<TimeDelta>,
}

impl SessionStatus {
    pub fn is_logging(&self) -> bool {
        self.state.is_logging()
    }
}

pub struct SessionTracker<'a, S: TimeCardStore, C: Clock = SystemClock> {
    store: &'a S,
    clock: C,
    state: SessionState,
}

impl<'a, S: TimeCardStore> SessionTracker<'a, S, SystemClock> {
    pub fn new(store: &'a S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<'a, S: TimeCardStore, C: Clock> SessionTracker<'a, S, C> {
    pub fn with_clock(store: &'a S, clock: C) -> Self {
        Self {
            store,
            clock,
            state: SessionState::NotLogging,
        }
    }

    pub fn store(&self) -> &S {
        self.store
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    /// State, pending start and elapsed time at `at`. Pure.
    pub fn current_session_state(&self, at: NaiveDateTime) -> SessionStatus {
        SessionStatus {
            state: self.state,
            started_at: self.state.started_at(),
            elapsed: self.state.elapsed(at),
        }
    }

    /// Shorthand for [`Self::current_session_state`] at the clock's now.
    pub fn status(&self) -> SessionStatus {
        self.current_session_state(self.clock.now())
    }

    /// Start a session. Returns false (and changes nothing) when one is
    /// already running.
    pub fn clock_in(&mut self) -> bool {
        if self.state.is_logging() {
            return false;
        }
        self.state = SessionState::Logging {
            since: self.clock.now(),
        };
        true
    }

    /// Close the running session into a valid, undescribed timecard.
    ///
    /// Returns `Ok(None)` when no session is running. If the insert fails
    /// the session stays open.
    pub fn clock_out(&mut self) -> AppResult<Option<TimeCard>> {
        let Some(since) = self.state.started_at() else {
            return Ok(None);
        };

        let mut card = TimeCard::new(since, self.clock.now(), true, "");
        let id = self.store.insert(&card)?;
        card.id = Some(id);
        self.state = SessionState::NotLogging;

        self.audit(
            "clock_out",
            &id.to_string(),
            &format!("{} -> {}", card.start_str(), card.end_str()),
        );

        Ok(Some(card))
    }

    /// Insert a card from canonical timestamp strings.
    ///
    /// Both timestamps are parsed before the store is touched.
    pub fn manual_add(
        &self,
        start: &str,
        end: &str,
        valid: bool,
        description: &str,
    ) -> AppResult<TimeCard> {
        let mut card = TimeCard::parse(start, end, valid, description)?;
        let id = self.store.insert(&card)?;
        card.id = Some(id);

        self.audit(
            "add",
            &id.to_string(),
            &format!("{} -> {} valid={}", card.start_str(), card.end_str(), valid),
        );

        Ok(card)
    }

    /// Overwrite card `id`. Returns false when no such card exists.
    pub fn edit(
        &self,
        id: i64,
        start: &str,
        end: &str,
        valid: bool,
        description: &str,
    ) -> AppResult<bool> {
        let start = parse_timestamp(start)?;
        let end = parse_timestamp(end)?;

        let changed = self.store.update(id, start, end, valid, description)?;
        if changed {
            self.audit(
                "edit",
                &id.to_string(),
                &format!(
                    "{} -> {} valid={}",
                    format_timestamp(&start),
                    format_timestamp(&end),
                    valid
                ),
            );
        }

        Ok(changed)
    }

    /// Refuse to close while a session is running.
    pub fn try_close(&self) -> AppResult<()> {
        match self.state.started_at() {
            Some(since) => Err(AppError::SessionActive(format_timestamp(&since))),
            None => Ok(()),
        }
    }

    fn audit(&self, operation: &str, target: &str, message: &str) {
        if let Err(e) = self.store.audit(operation, target, message) {
            warning(format!("Could not write the {} log entry: {}", operation, e));
        }
    }
}
