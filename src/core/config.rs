use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;
use std::fs;
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    pub fn print(path: &Path) -> AppResult<()> {
        if !path.exists() {
            info(format!(
                "No configuration file at {}, defaults in use:",
                path.display()
            ));
            let yaml = serde_yaml::to_string(&Config::default())
                .map_err(|e| AppError::Config(e.to_string()))?;
            println!("{}", yaml);
            return Ok(());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        println!("{}", content);
        Ok(())
    }

    pub fn edit(path: &Path, editor: &Option<String>) -> AppResult<()> {
        let ed = editor
            .clone()
            .or_else(|| std::env::var("EDITOR").ok())
            .unwrap_or_else(|| {
                if cfg!(target_os = "windows") {
                    "notepad".into()
                } else {
                    "nano".into()
                }
            });

        let status = Command::new(&ed)
            .arg(path)
            .status()
            .map_err(|e| AppError::Config(format!("cannot start '{ed}': {e}")))?;

        if !status.success() {
            return Err(AppError::Config(format!("'{ed}' exited with {status}")));
        }

        Ok(())
    }
}
