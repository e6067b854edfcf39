// src/export/csv.rs

use crate::core::aggregate::Aggregate;
use crate::errors::AppResult;
use crate::export::{export_error, notify_export_success};
use crate::models::timecard::TimeCard;
use crate::ui::messages::info;
use crate::utils::formatting::format_hours;
use ::csv::Writer;
use std::io;
use std::path::Path;

/// `[MM/DD/YYYY, "", descriptions, hours]` per day, in date order.
pub fn summary_rows(agg: &Aggregate) -> Vec<[String; 4]> {
    agg.days
        .iter()
        .map(|d| {
            [
                d.date.format("%m/%d/%Y").to_string(),
                String::new(),
                d.joined_descriptions(),
                format_hours(d.hours),
            ]
        })
        .collect()
}

/// Summary rows, no header.
pub fn write_summary<W: io::Write>(out: W, agg: &Aggregate) -> AppResult<()> {
    let mut wtr = Writer::from_writer(out);
    for row in summary_rows(agg) {
        wtr.write_record(&row).map_err(export_error("CSV write error"))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Every card with its table columns; `valid` as 0/1.
pub fn write_raw<W: io::Write>(out: W, cards: &[TimeCard]) -> AppResult<()> {
    let mut wtr = Writer::from_writer(out);
    wtr.write_record(["id", "start_time", "end_time", "valid", "description"])
        .map_err(export_error("CSV write error"))?;

    for c in cards {
        wtr.write_record([
            c.id.map(|id| id.to_string()).unwrap_or_default(),
            c.start_str(),
            c.end_str(),
            u8::from(c.valid).to_string(),
            c.description.clone(),
        ])
        .map_err(export_error("CSV write error"))?;
    }

    wtr.flush()?;
    Ok(())
}

pub(crate) fn export_summary(agg: &Aggregate, path: &Path) -> AppResult<()> {
    info(format!("Exporting daily summary to CSV: {}", path.display()));
    let file = std::fs::File::create(path)?;
    write_summary(file, agg)?;
    notify_export_success("CSV", path);
    Ok(())
}

pub(crate) fn export_raw(cards: &[TimeCard], path: &Path) -> AppResult<()> {
    info(format!("Exporting timecards to CSV: {}", path.display()));
    let file = std::fs::File::create(path)?;
    write_raw(file, cards)?;
    notify_export_success("Raw CSV", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregate::group_by_day;

    fn card(start: &str, end: &str, valid: bool, desc: &str) -> TimeCard {
        TimeCard::parse(start, end, valid, desc).unwrap()
    }

    #[test]
    fn summary_has_one_row_per_day() {
        let cards = vec![
            card("2024-03-05 09:00:00", "2024-03-05 10:20:00", true, "b"),
            card("2024-03-04 09:00:00", "2024-03-04 11:00:00", true, "a, with comma"),
            card("2024-03-04 13:00:00", "2024-03-04 14:30:00", true, "a2"),
            card("2024-03-04 15:00:00", "2024-03-04 16:00:00", false, "gone"),
        ];
        let mut buf = Vec::new();
        write_summary(&mut buf, &group_by_day(&cards)).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(
            text,
            "03/04/2024,,\"a, with comma | a2\",3.50\n03/05/2024,,b,1.33\n"
        );
    }

    #[test]
    fn raw_dump_keeps_invalid_cards() {
        let mut c = card("2024-03-04 09:00:00", "2024-03-04 10:00:00", false, "x");
        c.id = Some(7);
        let mut buf = Vec::new();
        write_raw(&mut buf, &[c]).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("id,start_time,end_time,valid,description"));
        assert_eq!(
            lines.next(),
            Some("7,2024-03-04 09:00:00,2024-03-04 10:00:00,0,x")
        );
    }
}
