pub mod day_summary;
pub mod entry_class;
pub mod session;
pub mod timecard;
