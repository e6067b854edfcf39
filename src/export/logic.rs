// src/export/logic.rs

use crate::core::aggregate::Report;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::chart::daily_bars;
use crate::export::csv::{export_raw, export_summary};
use crate::export::json::export_json;
use crate::export::pdf::export_pdf;
use crate::export::xlsx::{Ledger, export_xlsx};
use crate::ui::messages::warning;
use crate::utils::formatting::format_hours;
use crate::utils::fs_utils::ensure_writable;
use std::io;
use std::path::Path;

/// High-level export entry point.
pub struct ExportLogic;

impl ExportLogic {
    /// Write `report` to `file` in `format`.
    ///
    /// - `file` must be an absolute path; an existing file is only replaced
    ///   with `force` or after confirmation.
    /// - an empty window writes nothing and only warns, except for `xlsx`
    ///   whose ledger lists every day of the month anyway.
    /// - `xlsx` needs a window covering exactly one calendar month.
    pub fn export(
        report: &Report,
        format: ExportFormat,
        file: &str,
        force: bool,
        payment_label: &str,
    ) -> AppResult<()> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::from(io::Error::other(format!(
                "Output file path must be absolute: {file}"
            ))));
        }

        let ledger_month = match format {
            ExportFormat::Xlsx => Some(report.filter.month_of().ok_or_else(|| {
                AppError::Export(
                    "the xlsx ledger covers one month: use --month/--year or --range YYYY-MM"
                        .into(),
                )
            })?),
            _ => None,
        };

        if report.is_empty() && ledger_month.is_none() {
            warning(format!("No timecards found for: {}", report.filter.title()));
            return Ok(());
        }

        ensure_writable(path, force)?;

        match format {
            ExportFormat::Csv => export_summary(&report.aggregate, path)?,
            ExportFormat::Raw => export_raw(&report.cards, path)?,
            ExportFormat::Json => export_json(report, path)?,
            ExportFormat::Pdf => export_pdf(&daily_bars(&report.aggregate), path, "Hours per Day")?,
            ExportFormat::Xlsx => {
                if let Some((year, month)) = ledger_month {
                    let ledger = Ledger::build(report, year, month, payment_label)?;
                    if ledger.outside_hours.abs() >= 0.005 {
                        warning(format!(
                            "{} h from cards starting before {} are included in the totals but have no day row.",
                            format_hours(ledger.outside_hours),
                            ledger.sheet_name()
                        ));
                    }
                    export_xlsx(&ledger, path)?;
                }
            }
        }

        Ok(())
    }
}
