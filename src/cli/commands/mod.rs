pub mod add;
pub mod backup;
pub mod config;
pub mod db;
pub mod edit;
pub mod export;
pub mod import;
pub mod init;
pub mod list;
pub mod log;
pub mod report;
pub mod track;

use crate::core::aggregate::PaySummary;
use crate::utils::formatting::{bold, deduction_label, format_hours, format_money};

/// Totals footer shared by `list` and `report`.
pub(crate) fn print_pay(pay: &PaySummary, net_rate: f64) {
    println!();
    println!("{}", bold("Totals"));
    println!("Total hours: {}", format_hours(pay.total_hours));
    println!(
        "Gross pay:   {} ({}/h)",
        format_money(pay.gross_pay),
        format_money(pay.rate_per_hour)
    );
    println!(
        "Net pay:     {} (after {} deduction)",
        format_money(pay.net_pay),
        deduction_label(net_rate)
    );
}
