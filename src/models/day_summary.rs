use chrono::NaiveDate;
use serde::Serialize;

/// Valid hours and descriptions attributed to one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub hours: f64,
    pub descriptions: Vec<String>,
}

impl DaySummary {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            hours: 0.0,
            descriptions: Vec::new(),
        }
    }

    pub fn joined_descriptions(&self) -> String {
        self.descriptions.join(" | ")
    }
}
