//! Formatting utilities used for CLI and export outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Hours with two decimals, as shown in every report.
pub fn format_hours(hours: f64) -> String {
    format!("{:.2}", hours)
}

pub fn format_money(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Percentage withheld for a given net fraction (0.80 → "20%").
pub fn deduction_label(net_rate: f64) -> String {
    format!("{:.0}%", (1.0 - net_rate) * 100.0)
}
