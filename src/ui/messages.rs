use std::fmt;
use std::io::{self, Write};

/// ANSI colors
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    fn color(self) -> &'static str {
        match self {
            Level::Info => FG_BLUE,
            Level::Success => FG_GREEN,
            Level::Warning => FG_YELLOW,
            Level::Error => FG_RED,
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Level::Info => "ℹ️",
            Level::Success => "✅",
            Level::Warning => "⚠️",
            Level::Error => "❌",
        }
    }
}

/// Write one prefixed message line to `out`.
///
/// The interactive tracker uses this directly so its output can be captured.
pub fn write_message<W: Write, T: fmt::Display>(out: &mut W, level: Level, msg: T) -> io::Result<()> {
    writeln!(
        out,
        "{}{}{} {}{}",
        level.color(),
        BOLD,
        level.icon(),
        RESET,
        msg
    )
}

pub fn info<T: fmt::Display>(msg: T) {
    write_message(&mut io::stdout(), Level::Info, msg).ok();
}

pub fn success<T: fmt::Display>(msg: T) {
    write_message(&mut io::stdout(), Level::Success, msg).ok();
}

pub fn warning<T: fmt::Display>(msg: T) {
    write_message(&mut io::stdout(), Level::Warning, msg).ok();
}

pub fn error<T: fmt::Display>(msg: T) {
    write_message(&mut io::stderr(), Level::Error, msg).ok();
}

/// Section header above listings and reports.
pub fn header<T: fmt::Display>(msg: T) {
    println!("{}{}=== {} ==={}", FG_BLUE, BOLD, msg, RESET);
}
