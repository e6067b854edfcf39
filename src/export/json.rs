use crate::core::aggregate::{PaySummary, Report};
use crate::errors::AppResult;
use crate::export::{export_error, notify_export_success};
use crate::models::day_summary::DaySummary;
use crate::models::entry_class::EntryClass;
use crate::ui::messages::info;
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct JsonCard {
    pub id: Option<i64>,
    pub start_time: String,
    pub end_time: String,
    pub valid: bool,
    pub description: String,
    pub hours: f64,
    pub class: EntryClass,
}

/// Serialized shape of a report.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub title: String,
    pub days: &'a [DaySummary],
    pub total_hours: f64,
    pub invalid_count: usize,
    pub pay: PaySummary,
    pub cards: Vec<JsonCard>,
}

impl<'a> JsonReport<'a> {
    pub fn from_report(report: &'a Report) -> Self {
        JsonReport {
            title: report.filter.title(),
            days: &report.aggregate.days,
            total_hours: report.aggregate.total_hours,
            invalid_count: report.aggregate.invalid_count,
            pay: report.pay_summary(),
            cards: report
                .cards
                .iter()
                .map(|c| JsonCard {
                    id: c.id,
                    start_time: c.start_str(),
                    end_time: c.end_str(),
                    valid: c.valid,
                    description: c.description.clone(),
                    hours: c.hours(),
                    class: c.class(),
                })
                .collect(),
        }
    }
}

pub fn to_json(report: &Report) -> AppResult<String> {
    serde_json::to_string_pretty(&JsonReport::from_report(report))
        .map_err(export_error("JSON serialization error"))
}

/// Export JSON pretty-printed.
pub(crate) fn export_json(report: &Report, path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));
    fs::write(path, to_json(report)?)?;
    notify_export_success("JSON", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregate::PayParams;
    use crate::core::filter::Filter;
    use crate::models::timecard::TimeCard;

    #[test]
    fn report_serializes_days_pay_and_classes() {
        let cards = vec![
            TimeCard::parse("2024-03-04 09:00:00", "2024-03-04 14:00:00", true, "design").unwrap(),
            TimeCard::parse("2024-03-04 15:00:00", "2024-03-04 16:00:00", false, "").unwrap(),
        ];
        let pay = PayParams {
            rate_per_hour: 20.0,
            net_rate: 0.80,
        };
        let report = Report::build(&cards, Filter::All, pay);
        let v: serde_json::Value = serde_json::from_str(&to_json(&report).unwrap()).unwrap();

        assert_eq!(v["title"], "All timecards");
        assert_eq!(v["days"][0]["date"], "2024-03-04");
        assert_eq!(v["days"][0]["hours"], 5.0);
        assert_eq!(v["days"][0]["descriptions"][0], "design");
        assert_eq!(v["pay"]["gross_pay"], 100.0);
        assert_eq!(v["pay"]["net_pay"], 80.0);
        assert_eq!(v["invalid_count"], 1);
        assert_eq!(v["cards"][1]["class"], "invalid");
    }
}
