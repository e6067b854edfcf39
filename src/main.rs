//! WorkLogger main entrypoint.

use worklogger::run;
use worklogger::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
