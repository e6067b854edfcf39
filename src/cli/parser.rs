use crate::export::ExportFormat;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for WorkLogger
/// Track work sessions as timecards and report hours and pay
#[derive(Parser)]
#[command(
    name = "worklogger",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track work sessions as timecards in SQLite, report daily hours and pay, export CSV/JSON/XLSX/PDF",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Window selection shared by listing, reporting and export.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[arg(
        long,
        value_name = "RANGE",
        help = "Filter by start date: all, YYYY, YYYY-MM, YYYY-MM-DD or A:B pairs of the same shape"
    )]
    pub range: Option<String>,

    #[arg(long, value_name = "M", help = "Month (1-12); defaults to the current year")]
    pub month: Option<u32>,

    #[arg(long, value_name = "YYYY", help = "Year (alone: the whole year)")]
    pub year: Option<i32>,

    #[arg(
        long = "any-end",
        help = "With a month window, also include cards that end in the month"
    )]
    pub any_end: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the effective configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $VISUAL, $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Interactive clock-in / clock-out session (commands read from stdin)
    Track,

    /// Add a timecard manually
    Add {
        /// Start (YYYY-MM-DD HH:MM:SS)
        start: String,

        /// End (YYYY-MM-DD HH:MM:SS)
        end: String,

        #[arg(long, help = "Store the card as invalid (excluded from totals)")]
        invalid: bool,

        #[arg(long = "desc", value_name = "TEXT", help = "Description of the work done")]
        description: Option<String>,
    },

    /// Overwrite a timecard by id
    Edit {
        id: i64,

        /// Start (YYYY-MM-DD HH:MM:SS)
        start: String,

        /// End (YYYY-MM-DD HH:MM:SS)
        end: String,

        #[arg(long, help = "Mark the card invalid (excluded from totals)")]
        invalid: bool,

        #[arg(
            long = "desc",
            value_name = "TEXT",
            help = "New description (keeps the current one when omitted)"
        )]
        description: Option<String>,
    },

    /// List timecards with their status marker, totals and pay
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Per-day summary with totals and pay
    Report {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Export timecards
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE", help = "Absolute output path")]
        file: String,

        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long, short = 'f', help = "Overwrite without asking")]
        force: bool,
    },

    /// Import timecards from a legacy JSON log
    Import {
        #[arg(long, value_name = "FILE")]
        file: String,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Write a .zip archive instead of a plain copy")]
        compress: bool,

        #[arg(long, short = 'f', help = "Overwrite without asking")]
        force: bool,
    },
}

impl FilterArgs {
    pub fn resolve(&self) -> crate::errors::AppResult<crate::core::filter::Filter> {
        crate::core::filter::resolve(self.range.as_deref(), self.month, self.year, self.any_end)
    }
}
