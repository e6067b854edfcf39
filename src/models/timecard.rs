use super::entry_class::EntryClass;
use crate::errors::AppResult;
use crate::utils::time::{format_timestamp, hours_of, parse_timestamp};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

/// One recorded work interval.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeCard {
    pub id: Option<i64>,         // ⇔ timecards.id (assigned on insert)
    pub start: NaiveDateTime,    // ⇔ timecards.start_time ("YYYY-MM-DD HH:MM:SS")
    pub end: NaiveDateTime,      // ⇔ timecards.end_time
    pub valid: bool,             // ⇔ timecards.valid (0/1)
    pub description: String,     // ⇔ timecards.description (default '')
}

impl TimeCard {
    /// New, not yet persisted card.
    pub fn new(
        start: NaiveDateTime,
        end: NaiveDateTime,
        valid: bool,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            start,
            end,
            valid,
            description: description.into(),
        }
    }

    /// Build a card from canonical timestamp strings.
    ///
    /// No ordering check is made between `start` and `end`: an inverted
    /// interval is stored as-is and yields negative hours.
    pub fn parse(start: &str, end: &str, valid: bool, description: &str) -> AppResult<Self> {
        let start = parse_timestamp(start)?;
        let end = parse_timestamp(end)?;
        Ok(Self::new(start, end, valid, description))
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Duration in decimal hours.
    pub fn hours(&self) -> f64 {
        hours_of(self.duration())
    }

    /// Calendar day the card is attributed to.
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn start_str(&self) -> String {
        format_timestamp(&self.start)
    }

    pub fn end_str(&self) -> String {
        format_timestamp(&self.end)
    }

    pub fn has_description(&self) -> bool {
        !self.description.trim().is_empty()
    }

    pub fn class(&self) -> EntryClass {
        EntryClass::of(self)
    }
}
