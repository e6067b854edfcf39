// src/export/mod.rs

pub mod chart;
pub mod csv;
mod excel_date;
pub mod json;
pub mod logic;
mod pdf;
pub mod xlsx;

pub use logic::ExportLogic;

use crate::errors::AppError;
use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Shared completion message for every exporter.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

/// Wrap a writer-library error into an export error.
pub(crate) fn export_error<E: std::fmt::Display>(what: &str) -> impl Fn(E) -> AppError + '_ {
    move |e| AppError::Export(format!("{what}: {e}"))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Per-day summary rows
    Csv,
    /// Every timecard of the view, one row each
    Raw,
    /// Aggregated report as JSON
    Json,
    /// Monthly pay ledger
    Xlsx,
    /// Bar chart of hours per day
    Pdf,
}
