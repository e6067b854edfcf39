use crate::cli::commands::print_pay;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logic::Core;
use crate::db::store::SqliteStore;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::formatting::format_hours;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report { filter } = cmd {
        let filter = filter.resolve()?;
        let store = SqliteStore::open(&cfg.database)?;
        let report = Core::load_report(&store, filter, cfg.pay_params())?;

        header(format!("Daily summary: {}", report.filter.title()));

        if report.aggregate.days.is_empty() {
            info("No valid hours in this period.");
            return Ok(());
        }

        let mut table = Table::new(&["Date", "Hours", "Descriptions"]);
        for day in &report.aggregate.days {
            table.add_row(vec![
                day.date.format("%Y-%m-%d").to_string(),
                format_hours(day.hours),
                day.joined_descriptions(),
            ]);
        }
        print!("{}", table.render());

        print_pay(&report.pay_summary(), cfg.net_rate);
    }

    Ok(())
}
