use chrono::{NaiveDateTime, TimeDelta};

/// Clock-in state of the session tracker. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    NotLogging,
    Logging {
        since: NaiveDateTime,
    },
}

impl SessionState {
    pub fn is_logging(&self) -> bool {
        matches!(self, SessionState::Logging { .. })
    }

    pub fn started_at(&self) -> Option<NaiveDateTime> {
        match self {
            SessionState::Logging { since } => Some(*since),
            SessionState::NotLogging => None,
        }
    }

    /// Time spent in the active session at `now`.
    pub fn elapsed(&self, now: NaiveDateTime) -> Option<TimeDelta> {
        self.started_at().map(|since| now - since)
    }
}
