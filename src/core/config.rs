use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use std::env;
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    /// Print the effective configuration, noting where it was loaded from.
    pub fn print(cfg: &Config, path: &Path) -> AppResult<()> {
        if path.exists() {
            info(format!("Configuration file: {}", path.display()));
        } else {
            warning(format!(
                "No configuration file at {}; showing defaults (run `init` to create it).",
                path.display()
            ));
        }
        println!("{}", cfg.to_yaml()?);
        Ok(())
    }

    /// Open the configuration file in an editor: `--editor`, then `$VISUAL`,
    /// then `$EDITOR`, then the platform default.
    pub fn edit(path: &Path, editor: Option<&str>) -> AppResult<()> {
        if !path.exists() {
            return Err(AppError::Config(format!(
                "{} does not exist, run `init` first",
                path.display()
            )));
        }

        let ed = editor
            .map(str::to_string)
            .or_else(|| env::var("VISUAL").ok())
            .or_else(|| env::var("EDITOR").ok())
            .unwrap_or_else(default_editor);

        let status = Command::new(&ed)
            .arg(path)
            .status()
            .map_err(|e| AppError::Config(format!("cannot start '{}': {}", ed, e)))?;

        if !status.success() {
            return Err(AppError::Config(format!("'{}' exited with {}", ed, status)));
        }

        // reject an edit that leaves the file unreadable
        Config::load_from(path)?;
        Ok(())
    }
}

fn default_editor() -> String {
    if cfg!(target_os = "windows") {
        "notepad".into()
    } else {
        "nano".into()
    }
}
