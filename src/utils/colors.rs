/// ANSI color helper utilities for terminal output.
use crate::models::entry_class::EntryClass;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Invalid entries are greyed out, entries without a description are red.
pub fn color_for_class(class: EntryClass) -> &'static str {
    match class {
        EntryClass::Invalid => GREY,
        EntryClass::NoDescription => RED,
        EntryClass::Normal => RESET,
    }
}

pub fn colorize(value: &str, color: &str) -> String {
    if color == RESET {
        value.to_string()
    } else {
        format!("{color}{value}{RESET}")
    }
}
