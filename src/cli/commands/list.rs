use crate::cli::commands::print_pay;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logic::Core;
use crate::db::store::SqliteStore;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::colors::{color_for_class, colorize};
use crate::utils::formatting::format_hours;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { filter } = cmd {
        let filter = filter.resolve()?;
        let store = SqliteStore::open(&cfg.database)?;
        let report = Core::load_report(&store, filter, cfg.pay_params())?;

        header(report.filter.title());

        if report.is_empty() {
            info("No timecards found.");
            return Ok(());
        }

        let mut table = Table::new(&["", "ID", "Start", "End", "Hours", "Description"]);
        for card in &report.cards {
            let color = color_for_class(card.class());
            let cells = [
                card.class().marker().to_string(),
                card.id.map(|id| id.to_string()).unwrap_or_default(),
                card.start_str(),
                card.end_str(),
                format_hours(card.hours()),
                card.description.clone(),
            ];
            table.add_row(cells.iter().map(|c| colorize(c, color)).collect());
        }
        print!("{}", table.render());

        if report.aggregate.invalid_count > 0 {
            println!(
                "\n(x) {} invalid timecard(s) excluded from totals; (!) no description",
                report.aggregate.invalid_count
            );
        }

        print_pay(&report.pay_summary(), cfg.net_rate);
    }

    Ok(())
}
