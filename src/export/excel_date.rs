// src/export/excel_date.rs

use chrono::NaiveDate;

/// Number format used for ledger dates.
pub(crate) const DATE_FORMAT: &str = "mm/dd/yyyy";

/// Excel serial day number (1900 date system) of `d`.
pub(crate) fn date_to_excel_serial(d: NaiveDate) -> f64 {
    // day 0 is 1899-12-30 so that the phantom 1900-02-29 is accounted for
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or(NaiveDate::MIN);
    (d - epoch).num_days() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_serials() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
        assert_eq!(date_to_excel_serial(d(1900, 3, 1)), 61.0);
        assert_eq!(date_to_excel_serial(d(2024, 3, 1)), 45352.0);
    }
}
