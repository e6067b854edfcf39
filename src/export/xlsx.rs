// src/export/xlsx.rs

use crate::core::aggregate::{PaySummary, Report};
use crate::errors::{AppError, AppResult};
use crate::export::excel_date::{DATE_FORMAT, date_to_excel_serial};
use crate::export::{export_error, notify_export_success};
use crate::ui::messages::info;
use crate::utils::date::month_name;
use crate::utils::formatting::{format_hours, format_money};
use chrono::NaiveDate;
use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet, XlsxError};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

pub const HEADERS: [&str; 4] = ["Date", "Payment Method", "Description", "Hours"];

const DESCRIPTION_COL: u16 = 2;
const DESCRIPTION_WIDTH: f64 = 50.0;

#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRow {
    pub date: NaiveDate,
    pub payment_method: String,
    pub description: String,
    pub hours: f64,
}

/// One month of days plus its pay summary.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    pub year: i32,
    pub month: u32,
    pub rows: Vec<LedgerRow>,
    /// Totals of the whole view, identical to `report` for the same filter.
    pub pay: PaySummary,
    /// Valid hours counted in `pay` whose start day has no row in this month.
    pub outside_hours: f64,
}

impl Ledger {
    /// Every calendar day of the month, in order; days without valid cards
    /// carry 0 hours. Totals cover the whole view, so cards pulled in by
    /// end date from the previous month count there without a day row.
    pub fn build(report: &Report, year: i32, month: u32, payment_label: &str) -> AppResult<Ledger> {
        let rows: Vec<LedgerRow> = report
            .aggregate
            .month_days(year, month)?
            .into_iter()
            .map(|d| LedgerRow {
                date: d.date,
                payment_method: payment_label.to_string(),
                description: d.joined_descriptions(),
                hours: d.hours,
            })
            .collect();

        let pay = report.pay_summary();
        let listed = rows.iter().fold(0.0, |acc, r| acc + r.hours);

        Ok(Ledger {
            year,
            month,
            outside_hours: pay.total_hours - listed,
            pay,
            rows,
        })
    }

    /// Label / value pairs written below the day rows.
    pub fn summary_rows(&self) -> [(&'static str, f64); 4] {
        [
            ("Pay per Hour", self.pay.rate_per_hour),
            ("Total Hours", self.pay.total_hours),
            ("Gross Pay", self.pay.gross_pay),
            ("Net Pay", self.pay.net_pay),
        ]
    }

    pub fn sheet_name(&self) -> String {
        format!("{} {}", month_name(self.month), self.year)
    }
}

fn xlsx_err(e: XlsxError) -> AppError {
    AppError::Export(format!("XLSX write error: {e}"))
}

fn write_ledger(ws: &mut Worksheet, ledger: &Ledger) -> AppResult<()> {
    let header_fmt = Format::new().set_bold();
    let date_fmt = Format::new().set_num_format(DATE_FORMAT).set_align(FormatAlign::Top);
    let text_fmt = Format::new().set_align(FormatAlign::Top);
    let wrap_fmt = Format::new().set_text_wrap().set_align(FormatAlign::Top);
    let hours_fmt = Format::new().set_num_format("0.00").set_align(FormatAlign::Top);
    let money_fmt = Format::new().set_num_format("$#,##0.00");
    let label_fmt = Format::new().set_bold();

    ws.set_name(ledger.sheet_name()).map_err(xlsx_err)?;

    let mut col_widths: Vec<usize> = HEADERS.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    for (col, header) in HEADERS.iter().enumerate() {
        ws.write_with_format(0, col as u16, *header, &header_fmt)
            .map_err(xlsx_err)?;
    }
    ws.set_freeze_panes(1, 0).map_err(xlsx_err)?;

    for (i, r) in ledger.rows.iter().enumerate() {
        let row = (i + 1) as u32;

        ws.write_with_format(row, 0, date_to_excel_serial(r.date), &date_fmt)
            .map_err(xlsx_err)?;
        ws.write_with_format(row, 1, r.payment_method.as_str(), &text_fmt)
            .map_err(xlsx_err)?;
        ws.write_with_format(row, 2, r.description.as_str(), &wrap_fmt)
            .map_err(xlsx_err)?;
        ws.write_with_format(row, 3, r.hours, &hours_fmt)
            .map_err(xlsx_err)?;

        let shown = [
            r.date.format("%m/%d/%Y").to_string(),
            r.payment_method.clone(),
            String::new(),
            format_hours(r.hours),
        ];
        for (c, s) in shown.iter().enumerate() {
            col_widths[c] = col_widths[c].max(UnicodeWidthStr::width(s.as_str()));
        }
    }

    // one blank row, then the summary
    let first = ledger.rows.len() as u32 + 2;
    for (k, (label, value)) in ledger.summary_rows().iter().enumerate() {
        let row = first + k as u32;
        ws.write_with_format(row, 2, *label, &label_fmt)
            .map_err(xlsx_err)?;

        let shown = if *label == "Total Hours" {
            ws.write_with_format(row, 3, *value, &hours_fmt)
                .map_err(xlsx_err)?;
            format_hours(*value)
        } else {
            ws.write_with_format(row, 3, *value, &money_fmt)
                .map_err(xlsx_err)?;
            format_money(*value)
        };
        col_widths[3] = col_widths[3].max(UnicodeWidthStr::width(shown.as_str()));
    }

    for (c, w) in col_widths.iter().enumerate() {
        let c = c as u16;
        let width = if c == DESCRIPTION_COL {
            DESCRIPTION_WIDTH
        } else {
            *w as f64 + 2.0
        };
        ws.set_column_width(c, width).map_err(xlsx_err)?;
    }

    Ok(())
}

pub fn ledger_workbook(ledger: &Ledger) -> AppResult<Workbook> {
    let mut workbook = Workbook::new();
    let ws = workbook.add_worksheet();
    write_ledger(ws, ledger)?;
    Ok(workbook)
}

pub(crate) fn export_xlsx(ledger: &Ledger, path: &Path) -> AppResult<()> {
    info(format!("Exporting ledger to XLSX: {}", path.display()));

    let mut workbook = ledger_workbook(ledger)?;
    workbook.save(path).map_err(export_error("XLSX save error"))?;

    notify_export_success("XLSX", path);
    Ok(())
}
