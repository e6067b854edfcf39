//! `track`: a small line-oriented shell holding one work session.
//!
//! The session only lives as long as the process, so clock-in and clock-out
//! happen within the same invocation.

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::aggregate::PayParams;
use crate::core::logic::Core;
use crate::core::tracker::SessionTracker;
use crate::db::store::{SqliteStore, TimeCardStore};
use crate::errors::AppResult;
use crate::ui::messages::{Level, write_message};
use crate::utils::clock::Clock;
use crate::utils::formatting::{format_hours, format_money};
use crate::utils::time::{format_elapsed, format_timestamp};
use std::io::{self, BufRead, Write};

const HELP: &str = "Commands: in, out, status, help, quit";

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Track = cmd {
        let store = SqliteStore::open(&cfg.database)?;
        let mut tracker = SessionTracker::new(&store);

        let stdin = io::stdin();
        let mut stdout = io::stdout();
        writeln!(stdout, "WorkLogger session. {}", HELP)?;
        run_shell(&mut tracker, stdin.lock(), &mut stdout, cfg.pay_params())?;
    }

    Ok(())
}

/// Read commands from `input` until `quit` succeeds or input ends.
pub fn run_shell<S, C, R, W>(
    tracker: &mut SessionTracker<'_, S, C>,
    input: R,
    out: &mut W,
    pay: PayParams,
) -> AppResult<()>
where
    S: TimeCardStore,
    C: Clock,
    R: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line?;
        let command = line.trim().to_ascii_lowercase();

        match command.as_str() {
            "" => continue,
            "in" => {
                if tracker.clock_in() {
                    let since = tracker.status().started_at.unwrap_or_else(|| tracker.now());
                    write_message(
                        out,
                        Level::Success,
                        format!("Clocked in at {}", format_timestamp(&since)),
                    )?;
                } else {
                    write_message(out, Level::Warning, "Already logging: clock out first.")?;
                }
            }
            "out" => match tracker.clock_out() {
                Ok(Some(card)) => write_message(
                    out,
                    Level::Success,
                    format!(
                        "Clocked out: {} → {} ({} h), timecard {}",
                        card.start_str(),
                        card.end_str(),
                        format_hours(card.hours()),
                        card.id.unwrap_or_default()
                    ),
                )?,
                Ok(None) => write_message(out, Level::Warning, "Not logging: nothing to clock out.")?,
                Err(e) => write_message(out, Level::Error, e)?,
            },
            "status" => print_status(tracker, out, pay)?,
            "help" | "?" => writeln!(out, "{}", HELP)?,
            "quit" | "exit" => match tracker.try_close() {
                Ok(()) => return Ok(()),
                Err(e) => write_message(out, Level::Warning, e)?,
            },
            other => write_message(
                out,
                Level::Warning,
                format!("Unknown command '{}'. {}", other, HELP),
            )?,
        }
        out.flush()?;
    }

    if let Some(since) = tracker.status().started_at {
        write_message(
            out,
            Level::Warning,
            format!(
                "Input closed while logging since {}: the open session was not recorded.",
                format_timestamp(&since)
            ),
        )?;
    }

    Ok(())
}

fn print_status<S, C, W>(
    tracker: &SessionTracker<'_, S, C>,
    out: &mut W,
    pay: PayParams,
) -> AppResult<()>
where
    S: TimeCardStore,
    C: Clock,
    W: Write,
{
    let status = tracker.status();
    match (status.started_at, status.elapsed) {
        (Some(since), Some(elapsed)) => write_message(
            out,
            Level::Info,
            format!(
                "Logging since {} (elapsed {})",
                format_timestamp(&since),
                format_elapsed(elapsed)
            ),
        )?,
        _ => write_message(out, Level::Info, "Not logging.")?,
    }

    match Core::earnings(tracker.store(), pay) {
        Ok(e) => write_message(
            out,
            Level::Info,
            format!(
                "Recorded: {} h, gross {}, net {}",
                format_hours(e.total_hours),
                format_money(e.gross_pay),
                format_money(e.net_pay)
            ),
        )?,
        Err(e) => write_message(out, Level::Error, e)?,
    }

    Ok(())
}
