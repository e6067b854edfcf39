//! Aggregation windows: which timecards a view or an export covers.

use crate::errors::{AppError, AppResult};
use crate::models::timecard::TimeCard;
use crate::utils::date::{month_last_day, month_name, today};
use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// How a month window decides membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthMatch {
    /// The card starts in the month.
    #[default]
    Start,
    /// The card starts or ends in the month.
    StartOrEnd,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    /// Inclusive calendar-date window on the start day.
    Range { from: NaiveDate, to: NaiveDate },
    Month {
        year: i32,
        month: u32,
        mode: MonthMatch,
    },
}

fn in_month(ts: &NaiveDateTime, year: i32, month: u32) -> bool {
    ts.year() == year && ts.month() == month
}

impl Filter {
    pub fn month(year: i32, month: u32, mode: MonthMatch) -> AppResult<Filter> {
        if !(1..=12).contains(&month) {
            return Err(AppError::InvalidMonth(month));
        }
        Ok(Filter::Month { year, month, mode })
    }

    pub fn range(from: NaiveDate, to: NaiveDate) -> AppResult<Filter> {
        if from > to {
            return Err(AppError::InvalidRange(format!("{from} is after {to}")));
        }
        Ok(Filter::Range { from, to })
    }

    pub fn matches(&self, card: &TimeCard) -> bool {
        match self {
            Filter::All => true,
            Filter::Range { from, to } => {
                let d = card.date();
                *from <= d && d <= *to
            }
            Filter::Month { year, month, mode } => {
                in_month(&card.start, *year, *month)
                    || (*mode == MonthMatch::StartOrEnd && in_month(&card.end, *year, *month))
            }
        }
    }

    /// Matching cards, keeping their input order.
    pub fn apply(&self, cards: &[TimeCard]) -> Vec<TimeCard> {
        cards.iter().filter(|c| self.matches(c)).cloned().collect()
    }

    /// The calendar month this window covers exactly, if any.
    pub fn month_of(&self) -> Option<(i32, u32)> {
        match self {
            Filter::Month { year, month, .. } => Some((*year, *month)),
            Filter::Range { from, to } => {
                let last = month_last_day(from.year(), from.month())?;
                let whole_month = from.day() == 1
                    && to.year() == from.year()
                    && to.month() == from.month()
                    && to.day() == last;
                whole_month.then_some((from.year(), from.month()))
            }
            Filter::All => None,
        }
    }

    pub fn title(&self) -> String {
        match self {
            Filter::All => "All timecards".to_string(),
            Filter::Range { from, to } if from == to => format!("Timecards for {from}"),
            Filter::Range { from, to } => format!("Timecards from {from} to {to}"),
            Filter::Month { year, month, mode } => {
                let suffix = match mode {
                    MonthMatch::Start => "",
                    MonthMatch::StartOrEnd => " (start or end)",
                };
                format!("Timecards for {} {}{}", month_name(*month), year, suffix)
            }
        }
    }
}

fn invalid(r: &str, why: &str) -> AppError {
    AppError::InvalidRange(format!("'{r}': {why}"))
}

fn parse_year_month(p: &str) -> AppResult<(i32, u32)> {
    let (y, m) = p
        .split_once('-')
        .ok_or_else(|| invalid(p, "expected YYYY-MM"))?;
    let year: i32 = y.parse().map_err(|_| invalid(p, "invalid year"))?;
    let month: u32 = m.parse().map_err(|_| invalid(p, "invalid month"))?;
    if !(1..=12).contains(&month) {
        return Err(AppError::InvalidMonth(month));
    }
    Ok((year, month))
}

/// First and last day covered by a single period (`YYYY`, `YYYY-MM`, `YYYY-MM-DD`).
fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    match p.len() {
        4 => {
            let y: i32 = p.parse().map_err(|_| invalid(p, "invalid year"))?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(|| invalid(p, "invalid year"))?;
            let d2 =
                NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(|| invalid(p, "invalid year"))?;
            Ok((d1, d2))
        }
        7 => {
            let (y, m) = parse_year_month(p)?;
            let last = month_last_day(y, m).ok_or(AppError::InvalidMonth(m))?;
            let d1 = NaiveDate::from_ymd_opt(y, m, 1).ok_or_else(|| invalid(p, "invalid date"))?;
            let d2 =
                NaiveDate::from_ymd_opt(y, m, last).ok_or_else(|| invalid(p, "invalid date"))?;
            Ok((d1, d2))
        }
        10 => {
            let d = NaiveDate::parse_from_str(p, "%Y-%m-%d")
                .map_err(|_| AppError::InvalidDate(p.to_string()))?;
            Ok((d, d))
        }
        _ => Err(invalid(p, "unsupported period format")),
    }
}

/// Parse a `--range` expression.
///
/// Supports:
/// - `all`
/// - YYYY
/// - YYYY-MM (a month window)
/// - YYYY-MM-DD
/// - YYYY:YYYY
/// - YYYY-MM:YYYY-MM
/// - YYYY-MM-DD:YYYY-MM-DD
pub fn parse_range(r: &str) -> AppResult<Filter> {
    let r = r.trim();

    if r.eq_ignore_ascii_case("all") {
        return Ok(Filter::All);
    }

    if let Some((start_raw, end_raw)) = r.split_once(':') {
        let start = start_raw.trim();
        let end = end_raw.trim();

        if start.len() != end.len() {
            return Err(invalid(r, "start and end must have the same format"));
        }

        let (from, _) = period_bounds(start)?;
        let (_, to) = period_bounds(end)?;
        return Filter::range(from, to);
    }

    if r.len() == 7 {
        let (year, month) = parse_year_month(r)?;
        return Filter::month(year, month, MonthMatch::Start);
    }

    let (from, to) = period_bounds(r)?;
    Filter::range(from, to)
}

/// Combine the command-line filter options into one window.
///
/// `--month` (with `--year`, defaulting to the current year) and `--range`
/// are mutually exclusive; `--year` alone selects the whole year; nothing
/// selects every card. `any_end` switches a month window to start-or-end
/// matching.
pub fn resolve(
    range: Option<&str>,
    month: Option<u32>,
    year: Option<i32>,
    any_end: bool,
) -> AppResult<Filter> {
    let filter = match (range, month, year) {
        (Some(_), Some(_), _) | (Some(_), _, Some(_)) => {
            return Err(AppError::InvalidRange(
                "use either --range or --month/--year, not both".into(),
            ));
        }
        (Some(r), None, None) => parse_range(r)?,
        (None, Some(m), y) => Filter::month(y.unwrap_or_else(|| today().year()), m, MonthMatch::Start)?,
        (None, None, Some(y)) => parse_range(&format!("{y:04}"))?,
        (None, None, None) => Filter::All,
    };

    if !any_end {
        return Ok(filter);
    }

    match filter {
        Filter::Month { year, month, .. } => Filter::month(year, month, MonthMatch::StartOrEnd),
        _ => Err(AppError::InvalidRange(
            "--any-end only applies to a month window".into(),
        )),
    }
}
