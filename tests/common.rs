#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn wl() -> Command {
    cargo_bin_cmd!("worklogger")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_worklogger.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_worklogger_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn add_card(db_path: &str, start: &str, end: &str, extra: &[&str]) {
    let mut args = vec!["--db", db_path, "add", start, end];
    args.extend_from_slice(extra);
    wl().args(&args).assert().success();
}

/// Initialize DB and add a small dataset spanning February to April 2024
pub fn init_db_with_data(db_path: &str) {
    wl().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    add_card(db_path, "2024-02-29 22:00:00", "2024-03-01 02:00:00", &["--desc", "night shift"]);
    add_card(db_path, "2024-03-04 08:00:00", "2024-03-04 10:00:00", &["--desc", "planning"]);
    add_card(db_path, "2024-03-04 11:00:00", "2024-03-04 14:30:00", &["--desc", "review"]);
    add_card(db_path, "2024-03-04 15:00:00", "2024-03-04 18:00:00", &["--invalid", "--desc", "discarded"]);
    add_card(db_path, "2024-03-05 09:00:00", "2024-03-05 10:00:00", &[]);
    add_card(db_path, "2024-04-02 09:00:00", "2024-04-02 17:00:00", &["--desc", "april"]);
}
