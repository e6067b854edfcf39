//! Daily aggregation and pay totals over a filtered set of timecards.
//!
//! Only valid cards contribute hours or descriptions. Invalid cards stay in
//! the raw listing of a [`Report`] but are counted separately.

use crate::core::filter::Filter;
use crate::errors::AppResult;
use crate::models::day_summary::DaySummary;
use crate::models::timecard::TimeCard;
use crate::utils::date::all_days_of_month;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Pay parameters injected from the configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayParams {
    pub rate_per_hour: f64,
    /// Fraction of gross pay that is kept.
    pub net_rate: f64,
}

impl PayParams {
    pub fn gross(&self, hours: f64) -> f64 {
        hours * self.rate_per_hour
    }

    pub fn net(&self, hours: f64) -> f64 {
        self.gross(hours) * self.net_rate
    }

    pub fn summary(&self, total_hours: f64) -> PaySummary {
        PaySummary {
            rate_per_hour: self.rate_per_hour,
            total_hours,
            gross_pay: self.gross(total_hours),
            net_pay: self.net(total_hours),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PaySummary {
    pub rate_per_hour: f64,
    pub total_hours: f64,
    pub gross_pay: f64,
    pub net_pay: f64,
}

/// Per-day totals, sorted by date, for the days that have valid cards.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Aggregate {
    pub days: Vec<DaySummary>,
    pub total_hours: f64,
    pub invalid_count: usize,
}

impl Aggregate {
    pub fn day(&self, date: NaiveDate) -> Option<&DaySummary> {
        self.days.iter().find(|d| d.date == date)
    }

    /// Every calendar day of the month, with zero-hour entries for days
    /// without valid cards.
    pub fn month_days(&self, year: i32, month: u32) -> AppResult<Vec<DaySummary>> {
        Ok(all_days_of_month(year, month)?
            .into_iter()
            .map(|d| self.day(d).cloned().unwrap_or_else(|| DaySummary::empty(d)))
            .collect())
    }
}

/// Group valid cards by the calendar day of their start.
pub fn group_by_day(cards: &[TimeCard]) -> Aggregate {
    let mut by_day: BTreeMap<NaiveDate, DaySummary> = BTreeMap::new();
    let mut invalid_count = 0;

    for card in cards {
        if !card.valid {
            invalid_count += 1;
            continue;
        }

        let entry = by_day
            .entry(card.date())
            .or_insert_with(|| DaySummary::empty(card.date()));
        entry.hours += card.hours();
        if card.has_description() {
            entry.descriptions.push(card.description.clone());
        }
    }

    let days: Vec<DaySummary> = by_day.into_values().collect();
    // fold from +0.0: an empty f64 sum is -0.0
    let total_hours = days.iter().fold(0.0, |acc, d| acc + d.hours);

    Aggregate {
        days,
        total_hours,
        invalid_count,
    }
}

pub fn aggregate(cards: &[TimeCard], filter: &Filter) -> Aggregate {
    group_by_day(&filter.apply(cards))
}

/// Everything a view or an exporter needs for one window.
#[derive(Debug, Clone)]
pub struct Report {
    pub filter: Filter,
    /// Raw cards of the window, valid or not, in store order.
    pub cards: Vec<TimeCard>,
    pub aggregate: Aggregate,
    pub pay: PayParams,
}

impl Report {
    pub fn build(all: &[TimeCard], filter: Filter, pay: PayParams) -> Report {
        let cards = filter.apply(all);
        let aggregate = group_by_day(&cards);
        Report {
            filter,
            cards,
            aggregate,
            pay,
        }
    }

    pub fn pay_summary(&self) -> PaySummary {
        self.pay.summary(self.aggregate.total_hours)
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::MonthMatch;
    use crate::utils::formatting::{format_hours, format_money};

    fn card(start: &str, end: &str, valid: bool, desc: &str) -> TimeCard {
        TimeCard::parse(start, end, valid, desc).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const PAY: PayParams = PayParams {
        rate_per_hour: 20.0,
        net_rate: 0.80,
    };

    #[test]
    fn invalid_cards_add_nothing() {
        let cards = vec![
            card("2024-05-06 08:00:00", "2024-05-06 10:00:00", true, "planning"),
            card("2024-05-06 11:00:00", "2024-05-06 14:30:00", true, "  review "),
            card("2024-05-06 15:00:00", "2024-05-06 18:00:00", false, "discarded"),
            card("2024-05-06 18:00:00", "2024-05-06 18:30:00", true, ""),
        ];
        let agg = group_by_day(&cards);

        assert_eq!(agg.days.len(), 1);
        let day = &agg.days[0];
        assert!((day.hours - 6.0).abs() < 1e-9);
        // stored text is kept as written; blank ones are left out
        assert_eq!(day.descriptions, vec!["planning", "  review "]);
        assert_eq!(agg.invalid_count, 1);
    }

    #[test]
    fn two_valid_cards_sum_per_day() {
        let cards = vec![
            card("2024-05-06 08:00:00", "2024-05-06 10:00:00", true, "a"),
            card("2024-05-06 11:00:00", "2024-05-06 14:30:00", true, "b"),
            card("2024-05-06 15:00:00", "2024-05-06 18:00:00", false, "c"),
        ];
        let agg = group_by_day(&cards);
        assert_eq!(agg.days[0].hours, 5.5);
        assert_eq!(agg.days[0].joined_descriptions(), "a | b");
        assert_eq!(agg.total_hours, 5.5);
    }

    #[test]
    fn totals_without_valid_hours_are_positive_zero() {
        let only_invalid = [card("2024-05-06 08:00:00", "2024-05-06 10:00:00", false, "x")];

        for agg in [group_by_day(&only_invalid), group_by_day(&[])] {
            assert!(agg.total_hours.is_sign_positive());
            assert_eq!(format_hours(agg.total_hours), "0.00");
            let pay = PAY.summary(agg.total_hours);
            assert_eq!(format_money(pay.gross_pay), "$0.00");
            assert_eq!(format_money(pay.net_pay), "$0.00");
        }

        let json = serde_json::to_string(&group_by_day(&only_invalid)).unwrap();
        assert!(json.contains("\"total_hours\":0.0"), "{json}");
    }

    #[test]
    fn pay_totals() {
        let pay = PAY.summary(10.0);
        assert!((pay.gross_pay - 200.0).abs() < 1e-9);
        assert!((pay.net_pay - 160.0).abs() < 1e-9);
    }

    #[test]
    fn days_are_sorted_and_negative_hours_kept() {
        let cards = vec![
            card("2024-05-07 09:00:00", "2024-05-07 10:00:00", true, ""),
            card("2024-05-05 17:00:00", "2024-05-05 16:00:00", true, ""),
        ];
        let agg = group_by_day(&cards);
        assert_eq!(agg.days[0].date, ymd(2024, 5, 5));
        assert_eq!(agg.days[0].hours, -1.0);
        assert_eq!(agg.total_hours, 0.0);
    }

    #[test]
    fn month_report_covers_only_that_month() {
        let cards = vec![
            card("2024-02-29 09:00:00", "2024-02-29 12:00:00", true, "feb"),
            card("2024-03-04 09:00:00", "2024-03-04 17:00:00", true, "mar"),
            card("2024-03-31 22:00:00", "2024-04-01 02:00:00", true, "late"),
            card("2024-04-02 09:00:00", "2024-04-02 10:00:00", true, "apr"),
        ];
        let filter = Filter::month(2024, 3, MonthMatch::Start).unwrap();
        let report = Report::build(&cards, filter, PAY);

        assert_eq!(report.cards.len(), 2);
        assert_eq!(report.aggregate.total_hours, 12.0);

        let days = report.aggregate.month_days(2024, 3).unwrap();
        assert_eq!(days.len(), 31);
        assert_eq!(days[0].hours, 0.0);
        assert_eq!(days[3].hours, 8.0);
        assert_eq!(days[30].descriptions, vec!["late"]);

        let pay = report.pay_summary();
        assert!((pay.gross_pay - 240.0).abs() < 1e-9);
    }

    #[test]
    fn start_or_end_month_admits_spillover() {
        let cards = vec![
            card("2024-02-29 22:00:00", "2024-03-01 02:00:00", true, ""),
            card("2024-03-04 09:00:00", "2024-03-04 10:00:00", true, ""),
        ];
        let filter = Filter::month(2024, 3, MonthMatch::StartOrEnd).unwrap();
        let agg = aggregate(&cards, &filter);
        assert_eq!(agg.total_hours, 5.0);
        // attributed to the start day, outside the month grid
        assert_eq!(agg.days[0].date, ymd(2024, 2, 29));
    }
}
