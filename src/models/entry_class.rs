use super::timecard::TimeCard;
use serde::Serialize;

/// Display classification of a raw timecard in listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryClass {
    Invalid,
    NoDescription,
    Normal,
}

impl EntryClass {
    /// `Invalid` wins over `NoDescription`; whitespace-only descriptions count as empty.
    pub fn of(card: &TimeCard) -> Self {
        if !card.valid {
            EntryClass::Invalid
        } else if !card.has_description() {
            EntryClass::NoDescription
        } else {
            EntryClass::Normal
        }
    }

    /// One-character marker used in listings.
    pub fn marker(&self) -> &'static str {
        match self {
            EntryClass::Invalid => "x",
            EntryClass::NoDescription => "!",
            EntryClass::Normal => " ",
        }
    }
}
